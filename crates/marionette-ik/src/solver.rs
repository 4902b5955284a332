//! Damped least-squares IK over a skeleton's angle vector.
//!
//! Each pass commands a small step toward the target, maps it to joint
//! space through the normal equations, clamps the result, and repeats
//! until the commanded steps have covered the gap.

use marionette_core::config::SolverConfig;
use marionette_core::limits::LimitTable;
use marionette_skeleton::{EndEffectorId, Skeleton};
use nalgebra::{DMatrix, DVector, Point3};

use crate::jacobian::finite_difference_jacobian;
use crate::linsolve::solve_spd;

/// Result of an IK solve.
#[derive(Debug, Clone)]
pub struct IkResult {
    /// Whether the stepped target error fell within tolerance before the
    /// iteration cap.
    pub converged: bool,
    /// Number of iterations used.
    pub iterations: u32,
    /// End-effector distance to the target after the final update, from a
    /// fresh forward-kinematics pass.
    pub position_error: f64,
}

/// Damped least-squares IK solver.
///
/// Owns its configuration and the joint-limit table for the rig it drives;
/// the skeleton itself is borrowed per solve and updated in place.
pub struct IkSolver {
    config: SolverConfig,
    limits: LimitTable,
}

impl IkSolver {
    /// Create a new solver with the given configuration.
    pub const fn new(config: SolverConfig, limits: LimitTable) -> Self {
        Self { config, limits }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults(limits: LimitTable) -> Self {
        Self::new(SolverConfig::default(), limits)
    }

    /// Drive `end_effector` toward `target`, mutating the skeleton's angle
    /// vector in place.
    ///
    /// The error driving each step is measured against an internal stepped
    /// position that advances by `gain` of the remaining gap per iteration,
    /// so it contracts geometrically and the loop exits for any positive
    /// tolerance. At least one update is applied even when the skeleton
    /// already satisfies the tolerance. [`IkResult::position_error`] always
    /// reports the real end-effector gap.
    ///
    /// # Panics
    ///
    /// Panics if the limit table length differs from the skeleton's DOF
    /// count.
    pub fn solve(
        &self,
        skeleton: &mut Skeleton,
        end_effector: EndEffectorId,
        target: Point3<f64>,
        tolerance: f64,
    ) -> IkResult {
        assert_eq!(
            self.limits.len(),
            skeleton.dof(),
            "limit table length must equal skeleton DOF"
        );

        let dof = skeleton.dof();
        let mut theta = skeleton.theta().to_vec();
        let mut stepped = skeleton.end_effector_position(end_effector);
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.config.max_iterations {
            iterations += 1;

            let error = target - stepped;
            let dx = error * self.config.gain;

            let jacobian =
                finite_difference_jacobian(skeleton, end_effector, self.config.fd_step);
            let jt = jacobian.transpose();
            let normal = &jt * &jacobian + DMatrix::identity(dof, dof) * self.config.damping;
            let rhs = &jt * DVector::from_column_slice(&[dx.x, dx.y, dx.z]);
            let Some(delta) = solve_spd(normal, &rhs) else {
                // The damping keeps the system positive-definite, so this
                // only trips on non-finite state.
                break;
            };

            for (value, step) in theta.iter_mut().zip(delta.iter()) {
                *value += *step;
            }
            self.limits.clamp(&mut theta);
            skeleton.set_theta(&theta);
            stepped += dx;

            if error.norm() <= tolerance {
                converged = true;
                break;
            }
        }

        IkResult {
            converged,
            iterations,
            position_error: (target - skeleton.end_effector_position(end_effector)).norm(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
