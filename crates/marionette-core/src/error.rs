use thiserror::Error;

/// Top-level error type for marionette-core.
#[derive(Debug, Error)]
pub enum MarionetteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Limit table error: {0}")]
    Limit(#[from] LimitError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid gain: {0} (must be > 0)")]
    InvalidGain(f64),

    #[error("Invalid fd_step: {0} (must be > 0)")]
    InvalidFdStep(f64),

    #[error("Invalid damping: {0} (must be > 0)")]
    InvalidDamping(f64),

    #[error("max_iterations must be >= 1")]
    ZeroMaxIterations,

    #[error("Invalid limit table: {0}")]
    Limit(#[from] LimitError),
}

/// Joint-limit table errors.
///
/// Copy + static payloads for cheap propagation in hot paths.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LimitError {
    #[error("Inverted range at dof {dof}: lower {lower} > upper {upper}")]
    InvertedRange { dof: usize, lower: f64, upper: f64 },

    #[error("Non-finite bound at dof {dof}")]
    NonFiniteBound { dof: usize },
}
