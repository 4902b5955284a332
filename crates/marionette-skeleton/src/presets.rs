//! Prebuilt figures for demos and tests.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use marionette_core::limits::{DofLimit, LimitTable};
use nalgebra::{Matrix4, Point3, Vector3};

use crate::builder::SkeletonBuilder;
use crate::error::TopologyError;
use crate::skeleton::Skeleton;
use crate::types::DofMask;

fn translation(x: f64, y: f64, z: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}

fn scaling(x: f64, y: f64, z: f64) -> Matrix4<f64> {
    Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z))
}

/// Humanoid figure with an articulated right arm.
///
/// Ten degrees of freedom: the root translates freely, the right shoulder
/// carries all three rotations, the right elbow bends about x and y, the
/// right wrist about y and z. Every other joint is rigid. A `right_hand`
/// end-effector sits at the fingertips; at the zero pose it rests at
/// `(4.8, 7.5, 0)`.
pub fn human_figure() -> Skeleton {
    try_human_figure().expect("reference figure topology is valid")
}

fn try_human_figure() -> Result<Skeleton, TopologyError> {
    let mut builder = SkeletonBuilder::new();

    let torso = builder.segment("torso", scaling(0.9, 1.7, 0.5));
    let head = builder.segment("head", translation(0.0, 0.6, 0.0) * scaling(0.6, 0.6, 0.6));
    let right_upper_arm = builder.segment(
        "right_upper_arm",
        translation(1.0, 0.0, 0.0) * scaling(1.0, 0.2, 0.2),
    );
    let right_lower_arm = builder.segment(
        "right_lower_arm",
        translation(0.8, 0.0, 0.0) * scaling(0.8, 0.2, 0.2),
    );
    let right_hand = builder.segment(
        "right_hand",
        translation(0.4, 0.0, 0.0) * scaling(0.4, 0.3, 0.2),
    );
    let left_upper_arm = builder.segment(
        "left_upper_arm",
        translation(-1.0, 0.0, 0.0) * scaling(1.0, 0.2, 0.2),
    );
    let left_lower_arm = builder.segment(
        "left_lower_arm",
        translation(-0.8, 0.0, 0.0) * scaling(0.8, 0.2, 0.2),
    );
    let left_hand = builder.segment(
        "left_hand",
        translation(-0.4, 0.0, 0.0) * scaling(0.4, 0.3, 0.2),
    );
    let right_thigh = builder.segment(
        "right_thigh",
        translation(0.0, -1.1, 0.0) * scaling(0.3, 1.1, 0.4),
    );
    let right_shin = builder.segment(
        "right_shin",
        translation(0.0, -1.0, 0.0) * scaling(0.3, 1.0, 0.3),
    );
    let right_foot = builder.segment(
        "right_foot",
        translation(0.0, -0.15, 0.0) * scaling(0.3, 0.15, 0.3),
    );
    let left_thigh = builder.segment(
        "left_thigh",
        translation(0.0, -1.1, 0.0) * scaling(-0.3, 1.1, 0.4),
    );
    let left_shin = builder.segment(
        "left_shin",
        translation(0.0, -1.0, 0.0) * scaling(0.3, 1.0, 0.3),
    );
    let left_foot = builder.segment(
        "left_foot",
        translation(0.0, -0.15, 0.0) * scaling(0.3, 0.15, 0.3),
    );

    builder.root("root", torso, translation(0.0, 6.0, 0.0), DofMask::translation())?;
    builder.joint(
        "neck",
        torso,
        head,
        translation(0.0, 1.7, 0.0),
        DofMask::none(),
    )?;
    builder.joint(
        "right_shoulder",
        torso,
        right_upper_arm,
        translation(0.4, 1.5, 0.0),
        DofMask::rotation(),
    )?;
    builder.joint(
        "right_elbow",
        right_upper_arm,
        right_lower_arm,
        translation(2.0, 0.0, 0.0),
        DofMask::new(false, false, false, true, true, false),
    )?;
    let right_wrist = builder.joint(
        "right_wrist",
        right_lower_arm,
        right_hand,
        translation(1.6, 0.0, 0.0),
        DofMask::new(false, false, false, false, true, true),
    )?;
    builder.joint(
        "left_shoulder",
        torso,
        left_upper_arm,
        translation(-0.4, 1.5, 0.0),
        DofMask::none(),
    )?;
    builder.joint(
        "left_elbow",
        left_upper_arm,
        left_lower_arm,
        translation(-2.0, 0.0, 0.0),
        DofMask::none(),
    )?;
    builder.joint(
        "left_wrist",
        left_lower_arm,
        left_hand,
        translation(-1.6, 0.0, 0.0),
        DofMask::none(),
    )?;
    builder.joint(
        "right_hip",
        torso,
        right_thigh,
        translation(0.4, -1.5, 0.0),
        DofMask::none(),
    )?;
    builder.joint(
        "right_knee",
        right_thigh,
        right_shin,
        translation(0.0, -2.2, 0.0),
        DofMask::none(),
    )?;
    builder.joint(
        "right_ankle",
        right_shin,
        right_foot,
        translation(0.0, -2.0, 0.0),
        DofMask::none(),
    )?;
    builder.joint(
        "left_hip",
        torso,
        left_thigh,
        translation(-0.4, -1.5, 0.0),
        DofMask::none(),
    )?;
    builder.joint(
        "left_knee",
        left_thigh,
        left_shin,
        translation(0.0, -2.2, 0.0),
        DofMask::none(),
    )?;
    builder.joint(
        "left_ankle",
        left_shin,
        left_foot,
        translation(0.0, -2.0, 0.0),
        DofMask::none(),
    )?;

    builder.end_effector("right_hand", right_wrist, Point3::new(0.8, 0.0, 0.0));
    builder.build()
}

/// Joint limits matching [`human_figure`]'s angle-vector layout.
pub fn human_figure_limits() -> LimitTable {
    LimitTable::new(vec![
        // root Tx
        DofLimit::Range {
            lower: Some(-1.0),
            upper: Some(1.0),
        },
        // root Ty
        DofLimit::Pinned(0.0),
        // root Tz
        DofLimit::Range {
            lower: Some(-0.8),
            upper: None,
        },
        // right_shoulder Rx
        DofLimit::Free,
        // right_shoulder Ry
        DofLimit::Range {
            lower: Some(-FRAC_PI_2),
            upper: Some(FRAC_PI_2),
        },
        // right_shoulder Rz
        DofLimit::Range {
            lower: Some(-FRAC_PI_2),
            upper: Some(FRAC_PI_2),
        },
        // right_elbow Rx
        DofLimit::Range {
            lower: Some(-FRAC_PI_2),
            upper: Some(FRAC_PI_2),
        },
        // right_elbow Ry
        DofLimit::Range {
            lower: Some(0.0),
            upper: Some(PI),
        },
        // right_wrist Ry
        DofLimit::Range {
            lower: Some(-FRAC_PI_2),
            upper: Some(FRAC_PI_2),
        },
        // right_wrist Rz
        DofLimit::Range {
            lower: Some(-FRAC_PI_4),
            upper: Some(FRAC_PI_4),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn figure_dimensions() {
        let figure = human_figure();
        assert_eq!(figure.dof(), 10);
        assert_eq!(figure.segments().len(), 14);
        assert_eq!(figure.joints().len(), 14);
        assert!(figure.end_effector("right_hand").is_some());
    }

    #[test]
    fn rest_pose_hand_position() {
        let figure = human_figure();
        let hand = figure.end_effector("right_hand").unwrap();
        assert_relative_eq!(
            figure.end_effector_position(hand),
            Point3::new(4.8, 7.5, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn torso_draws_scaled_at_the_root() {
        let figure = human_figure();
        let torso = figure.segment("torso").unwrap();
        let expected = translation(0.0, 6.0, 0.0) * scaling(0.9, 1.7, 0.5);
        assert_relative_eq!(
            *figure.evaluate().segment_transform(torso),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn limits_cover_every_dof() {
        let figure = human_figure();
        let limits = human_figure_limits();
        assert_eq!(limits.len(), figure.dof());
        assert!(limits.validate().is_ok());
        assert_eq!(limits.limits()[1], DofLimit::Pinned(0.0));
    }
}
