//! Finite-difference Jacobian of an end-effector position.

use marionette_skeleton::{EndEffectorId, Skeleton};
use nalgebra::DMatrix;

/// 3 x DOF Jacobian of the end-effector's world position, estimated with
/// forward differences of the given step.
///
/// Each channel is perturbed through `set_theta` and measured with a full
/// forward-kinematics pass. The original pose is restored before returning,
/// so the skeleton is observably unchanged.
pub fn finite_difference_jacobian(
    skeleton: &mut Skeleton,
    end_effector: EndEffectorId,
    step: f64,
) -> DMatrix<f64> {
    let base = skeleton.end_effector_position(end_effector);
    let theta = skeleton.theta().to_vec();
    let mut perturbed = theta.clone();
    let mut jacobian = DMatrix::zeros(3, theta.len());

    for column in 0..theta.len() {
        perturbed[column] += step;
        skeleton.set_theta(&perturbed);
        let moved = skeleton.end_effector_position(end_effector);
        perturbed[column] = theta[column];
        for row in 0..3 {
            jacobian[(row, column)] = (moved[row] - base[row]) / step;
        }
    }

    skeleton.set_theta(&theta);
    jacobian
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use marionette_skeleton::{DofMask, SkeletonBuilder};
    use nalgebra::{Matrix4, Point3};

    /// Free-translating base carrying one z-hinge with a length-2 tip.
    fn rig() -> (Skeleton, EndEffectorId) {
        let mut builder = SkeletonBuilder::new();
        let base = builder.segment("base", Matrix4::identity());
        let arm = builder.segment("arm", Matrix4::identity());
        builder
            .root("root", base, Matrix4::identity(), DofMask::translation())
            .unwrap();
        let hinge = builder
            .joint(
                "hinge",
                base,
                arm,
                Matrix4::identity(),
                DofMask::new(false, false, false, false, false, true),
            )
            .unwrap();
        let tip = builder.end_effector("tip", hinge, Point3::new(2.0, 0.0, 0.0));
        (builder.build().unwrap(), tip)
    }

    #[test]
    fn translation_columns_are_basis_vectors() {
        let (mut skeleton, tip) = rig();
        let jacobian = finite_difference_jacobian(&mut skeleton, tip, 0.01);
        for column in 0..3 {
            for row in 0..3 {
                let expected = if row == column { 1.0 } else { 0.0 };
                assert_relative_eq!(jacobian[(row, column)], expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn rotation_column_approximates_the_tangent() {
        let (mut skeleton, tip) = rig();
        let jacobian = finite_difference_jacobian(&mut skeleton, tip, 0.01);
        // Analytic derivative of (2 cos a, 2 sin a) at a = 0 is (0, 2).
        // Forward differences carry O(h) bias off-axis.
        assert_relative_eq!(jacobian[(1, 3)], 2.0, epsilon = 1e-3);
        assert!(jacobian[(0, 3)].abs() < 0.02, "x bias too large: {}", jacobian[(0, 3)]);
        assert_relative_eq!(jacobian[(2, 3)], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn skeleton_state_is_restored() {
        let (mut skeleton, tip) = rig();
        skeleton.set_theta(&[0.5, -0.3, 1.0, 0.7]);
        let theta_before = skeleton.theta().to_vec();
        let snapshot_before = skeleton.evaluate();

        finite_difference_jacobian(&mut skeleton, tip, 0.01);

        assert_eq!(skeleton.theta(), theta_before.as_slice());
        assert_eq!(skeleton.evaluate(), snapshot_before);
    }
}
