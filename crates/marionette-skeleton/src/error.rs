//! Error types for skeleton construction.

/// Errors detected while assembling a skeleton.
///
/// All of these surface at construction time; a built [`Skeleton`] is always
/// a valid tree.
///
/// [`Skeleton`]: crate::skeleton::Skeleton
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// A root joint was already declared.
    #[error("root joint already declared: {0}")]
    RootAlreadyDeclared(String),

    /// The segment already has an incoming joint.
    #[error("segment already attached: {0}")]
    SegmentAlreadyAttached(String),

    /// `build` was called without declaring a root joint.
    #[error("no root joint declared")]
    MissingRoot,

    /// A declared segment cannot be reached from the root.
    #[error("segment unreachable from root: {0}")]
    UnreachableSegment(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = TopologyError::RootAlreadyDeclared("root".into());
        assert_eq!(e.to_string(), "root joint already declared: root");

        let e = TopologyError::SegmentAlreadyAttached("torso".into());
        assert_eq!(e.to_string(), "segment already attached: torso");

        let e = TopologyError::MissingRoot;
        assert_eq!(e.to_string(), "no root joint declared");

        let e = TopologyError::UnreachableSegment("left_foot".into());
        assert_eq!(e.to_string(), "segment unreachable from root: left_foot");
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_is_send_sync() {
        assert_send_sync::<TopologyError>();
    }
}
