//! Incremental construction of validated skeletons.

use nalgebra::{Matrix4, Point3};

use crate::error::TopologyError;
use crate::skeleton::Skeleton;
use crate::types::{DofMask, EndEffector, EndEffectorId, Joint, JointId, Segment, SegmentId};

/// Assembles segments and joints into a validated tree.
///
/// Segments are declared first, then connected by joints. Every segment may
/// receive at most one incoming joint, enforced eagerly; `build` then checks
/// that a root exists and that every segment hangs off it, so cycles and
/// orphans cannot survive construction. Joints claim their slice of the
/// angle vector in declaration order.
#[derive(Debug, Default)]
pub struct SkeletonBuilder {
    segments: Vec<Segment>,
    joints: Vec<Joint>,
    end_effectors: Vec<EndEffector>,
    root: Option<JointId>,
}

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a segment with its drawable shape transform.
    pub fn segment(&mut self, name: impl Into<String>, shape_transform: Matrix4<f64>) -> SegmentId {
        let id = SegmentId(self.segments.len());
        self.segments.push(Segment {
            name: name.into(),
            shape_transform,
            children: Vec::new(),
        });
        id
    }

    /// Declare the root joint, hanging `child` off the world frame.
    pub fn root(
        &mut self,
        name: impl Into<String>,
        child: SegmentId,
        location: Matrix4<f64>,
        dofs: DofMask,
    ) -> Result<JointId, TopologyError> {
        if let Some(root) = self.root {
            return Err(TopologyError::RootAlreadyDeclared(
                self.joints[root.index()].name.clone(),
            ));
        }
        let id = self.attach(name.into(), None, child, location, dofs)?;
        self.root = Some(id);
        Ok(id)
    }

    /// Declare a joint attaching `child` under `parent`.
    pub fn joint(
        &mut self,
        name: impl Into<String>,
        parent: SegmentId,
        child: SegmentId,
        location: Matrix4<f64>,
        dofs: DofMask,
    ) -> Result<JointId, TopologyError> {
        self.attach(name.into(), Some(parent), child, location, dofs)
    }

    /// Attach a named end-effector point to a joint's local frame.
    pub fn end_effector(
        &mut self,
        name: impl Into<String>,
        joint: JointId,
        local_offset: Point3<f64>,
    ) -> EndEffectorId {
        let id = EndEffectorId(self.end_effectors.len());
        self.end_effectors.push(EndEffector {
            name: name.into(),
            joint,
            local_offset,
        });
        id
    }

    /// Validate the topology and produce the skeleton, zero-posed.
    pub fn build(mut self) -> Result<Skeleton, TopologyError> {
        let Some(root) = self.root else {
            return Err(TopologyError::MissingRoot);
        };

        // Reachability from the root joint; the single-parent rule already
        // holds, so reaching every segment proves the graph is a tree.
        let mut reached = vec![false; self.segments.len()];
        let mut stack = vec![root];
        while let Some(joint) = stack.pop() {
            let child = self.joints[joint.index()].child;
            reached[child.index()] = true;
            stack.extend(self.segments[child.index()].children.iter().copied());
        }
        if let Some(index) = reached.iter().position(|&r| !r) {
            return Err(TopologyError::UnreachableSegment(
                self.segments[index].name.clone(),
            ));
        }

        // Claim angle-vector slices in declaration order.
        let mut offset = 0;
        for joint in &mut self.joints {
            joint.theta_offset = offset;
            offset += joint.dofs.count();
        }

        Ok(Skeleton::assemble(
            self.segments,
            self.joints,
            self.end_effectors,
            root,
            offset,
        ))
    }

    fn attach(
        &mut self,
        name: String,
        parent: Option<SegmentId>,
        child: SegmentId,
        location: Matrix4<f64>,
        dofs: DofMask,
    ) -> Result<JointId, TopologyError> {
        if self.joints.iter().any(|j| j.child == child) {
            return Err(TopologyError::SegmentAlreadyAttached(
                self.segments[child.index()].name.clone(),
            ));
        }
        let id = JointId(self.joints.len());
        self.joints.push(Joint {
            name,
            parent,
            child,
            location,
            articulation: Matrix4::identity(),
            dofs,
            theta_offset: 0,
        });
        if let Some(parent) = parent {
            self.segments[parent.index()].children.push(id);
        }
        Ok(id)
    }
}
