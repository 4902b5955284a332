//! The assembled kinematic tree: angle state, articulation, forward
//! kinematics.

use nalgebra::{Matrix4, Point3};

use crate::types::{DofMask, EndEffector, EndEffectorId, Joint, JointId, Segment, SegmentId};

// ---------------------------------------------------------------------------
// FkSnapshot
// ---------------------------------------------------------------------------

/// World-space result of one forward-kinematics pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FkSnapshot {
    segment_transforms: Vec<Matrix4<f64>>,
    end_effector_positions: Vec<Point3<f64>>,
}

impl FkSnapshot {
    /// Drawable transform of a segment: its joint frame times its shape
    /// transform.
    pub fn segment_transform(&self, segment: SegmentId) -> &Matrix4<f64> {
        &self.segment_transforms[segment.index()]
    }

    /// World position of an end-effector.
    pub fn end_effector_position(&self, end_effector: EndEffectorId) -> Point3<f64> {
        self.end_effector_positions[end_effector.index()]
    }
}

// ---------------------------------------------------------------------------
// Skeleton
// ---------------------------------------------------------------------------

/// A validated kinematic tree with its angle vector.
///
/// Built by [`SkeletonBuilder`]; the topology is immutable afterward, only
/// the angle vector and the per-joint articulation transforms change.
///
/// [`SkeletonBuilder`]: crate::builder::SkeletonBuilder
#[derive(Debug, Clone)]
pub struct Skeleton {
    segments: Vec<Segment>,
    joints: Vec<Joint>,
    end_effectors: Vec<EndEffector>,
    root: JointId,
    theta: Vec<f64>,
}

impl Skeleton {
    pub(crate) fn assemble(
        segments: Vec<Segment>,
        joints: Vec<Joint>,
        end_effectors: Vec<EndEffector>,
        root: JointId,
        dof: usize,
    ) -> Self {
        let mut skeleton = Self {
            segments,
            joints,
            end_effectors,
            root,
            theta: vec![0.0; dof],
        };
        skeleton.refresh_articulations();
        skeleton
    }

    /// Total number of degrees of freedom.
    pub fn dof(&self) -> usize {
        self.theta.len()
    }

    /// Current angle vector.
    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn end_effectors(&self) -> &[EndEffector] {
        &self.end_effectors
    }

    pub fn root(&self) -> JointId {
        self.root
    }

    /// Look up a segment by name (first match).
    pub fn segment(&self, name: &str) -> Option<SegmentId> {
        self.segments
            .iter()
            .position(|s| s.name == name)
            .map(SegmentId)
    }

    /// Look up a joint by name (first match).
    pub fn joint(&self, name: &str) -> Option<JointId> {
        self.joints
            .iter()
            .position(|j| j.name == name)
            .map(JointId)
    }

    /// Look up an end-effector by name (first match).
    pub fn end_effector(&self, name: &str) -> Option<EndEffectorId> {
        self.end_effectors
            .iter()
            .position(|e| e.name == name)
            .map(EndEffectorId)
    }

    /// Replace the whole angle vector and re-derive every articulation.
    ///
    /// # Panics
    ///
    /// Panics if `theta.len()` differs from the skeleton's DOF count.
    pub fn set_theta(&mut self, theta: &[f64]) {
        assert_eq!(
            theta.len(),
            self.dof(),
            "theta.len() must equal skeleton DOF"
        );
        self.theta.copy_from_slice(theta);
        self.refresh_articulations();
    }

    /// Rebuild one joint's articulation transform from an explicit slice.
    ///
    /// [`set_theta`] is the normal path and keeps the stored angle vector in
    /// step; this entry point exists for callers driving a single joint
    /// directly and leaves the stored vector untouched.
    ///
    /// # Panics
    ///
    /// Panics if `theta.len()` differs from the joint's DOF count.
    ///
    /// [`set_theta`]: Skeleton::set_theta
    pub fn update_joint_articulation(&mut self, joint: JointId, theta: &[f64]) {
        let dofs = self.joints[joint.index()].dofs;
        assert_eq!(
            theta.len(),
            dofs.count(),
            "theta.len() must equal joint DOF"
        );
        self.joints[joint.index()].articulation = articulation_from(dofs, theta);
    }

    /// Run forward kinematics for the current articulation state.
    ///
    /// Pure with respect to the skeleton: two calls without an intervening
    /// mutation return identical snapshots.
    pub fn evaluate(&self) -> FkSnapshot {
        let mut snapshot = FkSnapshot {
            segment_transforms: vec![Matrix4::identity(); self.segments.len()],
            end_effector_positions: vec![Point3::origin(); self.end_effectors.len()],
        };
        self.visit(self.root, Matrix4::identity(), &mut snapshot);
        snapshot
    }

    /// World position of one end-effector from a fresh FK pass.
    pub fn end_effector_position(&self, end_effector: EndEffectorId) -> Point3<f64> {
        self.evaluate().end_effector_position(end_effector)
    }

    fn refresh_articulations(&mut self) {
        for index in 0..self.joints.len() {
            let joint = &self.joints[index];
            let articulation = articulation_from(joint.dofs, &self.theta[joint.theta_range()]);
            self.joints[index].articulation = articulation;
        }
    }

    fn visit(&self, joint_id: JointId, running: Matrix4<f64>, snapshot: &mut FkSnapshot) {
        let joint = &self.joints[joint_id.index()];
        let frame = running * joint.location * joint.articulation;

        for (index, end_effector) in self.end_effectors.iter().enumerate() {
            if end_effector.joint == joint_id {
                snapshot.end_effector_positions[index] =
                    frame.transform_point(&end_effector.local_offset);
            }
        }

        let child = joint.child;
        snapshot.segment_transforms[child.index()] =
            frame * self.segments[child.index()].shape_transform;

        // Children continue from the joint frame; the shape transform is
        // leaf-only.
        for &grandchild in self.segments[child.index()].children() {
            self.visit(grandchild, frame, snapshot);
        }
    }
}

/// Compose the elementary channel transforms for `theta`, first active
/// channel innermost.
fn articulation_from(dofs: DofMask, theta: &[f64]) -> Matrix4<f64> {
    let mut articulation = Matrix4::identity();
    for (channel, &value) in dofs.channels().zip(theta) {
        articulation = channel.elementary(value) * articulation;
    }
    articulation
}
