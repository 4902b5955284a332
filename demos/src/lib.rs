//! Shared rig and path fixtures for the Marionette demos.

use marionette_ik::IkSolver;
use marionette_skeleton::presets::{human_figure, human_figure_limits};
use marionette_skeleton::{EndEffectorId, Skeleton};
use marionette_spline::Spline;
use nalgebra::{Point3, Vector3};

/// Point on the blackboard the reach phase aims for, also the start of the
/// drawing loop.
pub const BOARD_CENTER: Point3<f64> = Point3::new(3.0, 7.0, -0.9);

/// Position tolerance handed to every IK solve in the demos.
pub const REACH_TOLERANCE: f64 = 0.4;

/// The preset figure, its drawing hand, and a solver wired to its limits.
pub fn writer_rig() -> (Skeleton, EndEffectorId, IkSolver) {
    let figure = human_figure();
    let hand = figure
        .end_effector("right_hand")
        .expect("preset figure carries a right_hand end-effector");
    let solver = IkSolver::with_defaults(human_figure_limits());
    (figure, hand, solver)
}

/// Closed figure-eight on the blackboard plane `z = -0.9`.
///
/// Starts and ends at [`BOARD_CENTER`]; the first and last control points
/// coincide so a looping parameter draws without a seam.
pub fn blackboard_loop() -> Spline {
    let mut path = Spline::new();
    path.add_point(Point3::new(3.0, 7.0, -0.9), Vector3::new(-1.0, 1.0, 0.0));
    path.add_point(Point3::new(2.0, 8.0, -0.9), Vector3::new(0.0, 15.0, 0.0));
    path.add_point(Point3::new(3.0, 9.0, -0.9), Vector3::new(15.0, 0.0, 0.0));
    path.add_point(Point3::new(4.0, 8.0, -0.9), Vector3::new(0.0, -15.0, 0.0));
    path.add_point(Point3::new(3.0, 7.0, -0.9), Vector3::new(-1.0, -1.0, 0.0));
    path.add_point(Point3::new(2.0, 6.0, -0.9), Vector3::new(0.0, -15.0, 0.0));
    path.add_point(Point3::new(3.0, 5.0, -0.9), Vector3::new(15.0, 0.0, 0.0));
    path.add_point(Point3::new(4.0, 6.0, -0.9), Vector3::new(0.0, 15.0, 0.0));
    path.add_point(Point3::new(3.0, 7.0, -0.9), Vector3::new(-1.0, 1.0, 0.0));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn loop_is_seamless() {
        let path = blackboard_loop();
        assert_eq!(path.len(), 9);
        assert_relative_eq!(path.position_at(0.0), BOARD_CENTER, epsilon = 1e-12);
        assert_relative_eq!(path.position_at(1.0), BOARD_CENTER, epsilon = 1e-12);
    }

    #[test]
    fn loop_stays_on_the_board_plane() {
        let path = blackboard_loop();
        for i in 0..=100 {
            let u = f64::from(i) / 100.0;
            let p = path.position_at(u);
            assert_relative_eq!(p.z, -0.9, epsilon = 1e-12);
        }
    }

    #[test]
    fn rig_hand_rests_off_the_board() {
        let (figure, hand, _) = writer_rig();
        let rest = figure.end_effector_position(hand);
        assert!((rest - BOARD_CENTER).norm() > REACH_TOLERANCE);
    }
}
