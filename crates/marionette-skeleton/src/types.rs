//! Core data types for the kinematic tree.
//!
//! Segments and joints live in arenas owned by the skeleton and reference
//! each other through typed indices instead of pointers.

use nalgebra::{Matrix4, Point3, Vector3};

// ---------------------------------------------------------------------------
// Arena ids
// ---------------------------------------------------------------------------

/// Arena index of a segment within its skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(pub(crate) usize);

/// Arena index of a joint within its skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId(pub(crate) usize);

/// Arena index of an end-effector within its skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndEffectorId(pub(crate) usize);

impl SegmentId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl JointId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl EndEffectorId {
    pub const fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// One elementary motion channel of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Tx,
    Ty,
    Tz,
    Rx,
    Ry,
    Rz,
}

impl Channel {
    /// Every channel, in the order joints consume angle-vector slots and
    /// compose their elementary transforms.
    pub const ALL: [Self; 6] = [Self::Tx, Self::Ty, Self::Tz, Self::Rx, Self::Ry, Self::Rz];

    /// Homogeneous transform for this channel at `value` (length units for
    /// translations, radians for rotations).
    pub fn elementary(self, value: f64) -> Matrix4<f64> {
        match self {
            Self::Tx => Matrix4::new_translation(&Vector3::new(value, 0.0, 0.0)),
            Self::Ty => Matrix4::new_translation(&Vector3::new(0.0, value, 0.0)),
            Self::Tz => Matrix4::new_translation(&Vector3::new(0.0, 0.0, value)),
            Self::Rx => Matrix4::new_rotation(Vector3::new(value, 0.0, 0.0)),
            Self::Ry => Matrix4::new_rotation(Vector3::new(0.0, value, 0.0)),
            Self::Rz => Matrix4::new_rotation(Vector3::new(0.0, 0.0, value)),
        }
    }
}

// ---------------------------------------------------------------------------
// DofMask
// ---------------------------------------------------------------------------

/// Which of the six channels a joint consumes from the angle vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DofMask {
    tx: bool,
    ty: bool,
    tz: bool,
    rx: bool,
    ry: bool,
    rz: bool,
}

impl DofMask {
    pub const fn new(tx: bool, ty: bool, tz: bool, rx: bool, ry: bool, rz: bool) -> Self {
        Self {
            tx,
            ty,
            tz,
            rx,
            ry,
            rz,
        }
    }

    /// No channels; the joint is a rigid attachment.
    pub const fn none() -> Self {
        Self::new(false, false, false, false, false, false)
    }

    /// The three translation channels.
    pub const fn translation() -> Self {
        Self::new(true, true, true, false, false, false)
    }

    /// The three rotation channels.
    pub const fn rotation() -> Self {
        Self::new(false, false, false, true, true, true)
    }

    pub const fn contains(self, channel: Channel) -> bool {
        match channel {
            Channel::Tx => self.tx,
            Channel::Ty => self.ty,
            Channel::Tz => self.tz,
            Channel::Rx => self.rx,
            Channel::Ry => self.ry,
            Channel::Rz => self.rz,
        }
    }

    /// Number of active channels.
    pub const fn count(self) -> usize {
        self.tx as usize
            + self.ty as usize
            + self.tz as usize
            + self.rx as usize
            + self.ry as usize
            + self.rz as usize
    }

    /// Active channels in composition order.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// A rigid body part of the figure.
#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    /// Scale/offset of the drawable relative to the owning joint frame.
    /// Cosmetic: never handed down to child joints.
    pub shape_transform: Matrix4<f64>,
    pub(crate) children: Vec<JointId>,
}

impl Segment {
    /// Outgoing joints, in attachment order.
    pub fn children(&self) -> &[JointId] {
        &self.children
    }
}

// ---------------------------------------------------------------------------
// Joint
// ---------------------------------------------------------------------------

/// Directed edge from a parent segment to a child segment.
#[derive(Debug, Clone)]
pub struct Joint {
    pub name: String,
    pub(crate) parent: Option<SegmentId>,
    pub(crate) child: SegmentId,
    /// Fixed offset from the parent frame to this joint.
    pub location: Matrix4<f64>,
    /// Motion transform rebuilt from this joint's slice of the angle vector.
    pub(crate) articulation: Matrix4<f64>,
    pub dofs: DofMask,
    pub(crate) theta_offset: usize,
}

impl Joint {
    /// Parent segment; `None` for the root joint.
    pub fn parent(&self) -> Option<SegmentId> {
        self.parent
    }

    pub fn child(&self) -> SegmentId {
        self.child
    }

    pub fn articulation(&self) -> Matrix4<f64> {
        self.articulation
    }

    pub const fn dof(&self) -> usize {
        self.dofs.count()
    }

    /// Slice of the angle vector consumed by this joint.
    pub fn theta_range(&self) -> std::ops::Range<usize> {
        self.theta_offset..self.theta_offset + self.dofs.count()
    }
}

// ---------------------------------------------------------------------------
// EndEffector
// ---------------------------------------------------------------------------

/// A named point fixed in one joint's local frame.
#[derive(Debug, Clone)]
pub struct EndEffector {
    pub name: String,
    /// Joint whose frame the offset lives in.
    pub joint: JointId,
    pub local_offset: Point3<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ---- DofMask ----

    #[test]
    fn dof_mask_counts_active_channels() {
        assert_eq!(DofMask::none().count(), 0);
        assert_eq!(DofMask::translation().count(), 3);
        assert_eq!(DofMask::rotation().count(), 3);
        assert_eq!(
            DofMask::new(true, false, false, false, true, true).count(),
            3
        );
    }

    #[test]
    fn dof_mask_channels_keep_composition_order() {
        let mask = DofMask::new(true, false, true, true, false, true);
        let channels: Vec<Channel> = mask.channels().collect();
        assert_eq!(
            channels,
            vec![Channel::Tx, Channel::Tz, Channel::Rx, Channel::Rz]
        );
    }

    #[test]
    fn dof_mask_contains() {
        let mask = DofMask::rotation();
        assert!(mask.contains(Channel::Rx));
        assert!(!mask.contains(Channel::Tx));
    }

    // ---- Channel elementary transforms ----

    #[test]
    fn translation_channel_moves_a_point() {
        let point = Channel::Ty.elementary(2.5).transform_point(&Point3::origin());
        assert_relative_eq!(point, Point3::new(0.0, 2.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rotation_channel_about_x_maps_y_to_z() {
        let point = Channel::Rx
            .elementary(std::f64::consts::FRAC_PI_2)
            .transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(point, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }
}
