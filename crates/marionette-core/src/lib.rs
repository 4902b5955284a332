// marionette-core: Config, joint-limit tables, and errors for the Marionette animation stack.

pub mod config;
pub mod error;
pub mod limits;
