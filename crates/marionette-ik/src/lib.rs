//! Inverse kinematics for marionette skeletons.
//!
//! Drives a chosen end-effector toward a world-space target by iterating
//! small damped least-squares steps over the skeleton's angle vector:
//!
//! ```text
//! Skeleton ──► FD Jacobian ──► (J^T J + damping I) dtheta = J^T dx ──► clamp ──► theta
//! ```
//!
//! The solver mutates the skeleton in place and reports how close the
//! end-effector actually landed.

pub mod jacobian;
pub mod linsolve;
pub mod solver;

pub use jacobian::finite_difference_jacobian;
pub use linsolve::solve_spd;
pub use solver::{IkResult, IkSolver};
