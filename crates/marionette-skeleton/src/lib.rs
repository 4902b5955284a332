//! Articulated-figure skeletons and forward kinematics.
//!
//! A figure is a tree of rigid segments connected by joints. Each joint owns
//! a fixed location transform, a DOF mask selecting which of the six motion
//! channels it consumes, and an articulation transform rebuilt from its slice
//! of the skeleton-wide angle vector. Forward kinematics walks the tree once
//! and records where everything landed:
//!
//! ```text
//!   SkeletonBuilder --build()--> Skeleton --evaluate()--> FkSnapshot
//!        segments                  theta                    drawable
//!        joints                    articulations            transforms,
//!        end-effectors                                      EE positions
//! ```
//!
//! Segment shape transforms are cosmetic and apply only to the segment's own
//! drawable; child joints always continue from the bare joint frame.

pub mod builder;
pub mod error;
pub mod presets;
pub mod skeleton;
pub mod types;

pub use builder::SkeletonBuilder;
pub use error::TopologyError;
pub use skeleton::{FkSnapshot, Skeleton};
pub use types::{
    Channel, DofMask, EndEffector, EndEffectorId, Joint, JointId, Segment, SegmentId,
};
