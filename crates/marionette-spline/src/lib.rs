//! Cubic Hermite splines with arc-length reparameterization.
//!
//! ```text
//! control points + tangents
//!           |
//!        Spline --- position_at(u) ------------------> Point3
//!           |
//!           | rebuilt on every mutation
//!           v
//!     ArcLengthTable --- length_at(u) ---------------> distance
//!           |
//!           `--- parameter_at(s), bisection ---------> u
//! ```
//!
//! Composing `position_at(parameter_at(constant_velocity_length(t)))` moves
//! at constant speed along the curve regardless of control-point spacing.

pub mod curve;
pub mod table;

pub use curve::Spline;
pub use table::ArcLengthTable;
