//! # Cluster Membership
//!
//! Describes the position a node occupies inside an application's
//! cluster: which cluster, which index within it, and whether the
//! membership has been marked retired.
//!
//! Membership values are immutable. Marking a membership retired
//! produces a new value and leaves the original untouched, which is what
//! lets node snapshots be shared freely across threads.

use serde::{Deserialize, Serialize};

use crate::identity::ClusterId;

/// A node's place within an application cluster.
///
/// `retired` means the cluster still counts the node as a member but the
/// orchestrator intends to move its load elsewhere and eventually remove
/// it. A retired membership keeps its cluster and index so that data
/// migration can find the node until the very end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterMembership {
    cluster: ClusterId,
    index: u32,
    retired: bool,
}

impl ClusterMembership {
    /// Create an unretired membership at the given cluster index.
    pub fn new(cluster: ClusterId, index: u32) -> Self {
        Self {
            cluster,
            index,
            retired: false,
        }
    }

    /// The cluster this membership belongs to.
    pub fn cluster(&self) -> &ClusterId {
        &self.cluster
    }

    /// The node's index within the cluster.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Whether this membership is marked retired.
    pub fn retired(&self) -> bool {
        self.retired
    }

    /// Returns a copy of this membership marked retired.
    pub fn retire(&self) -> Self {
        Self {
            retired: true,
            ..self.clone()
        }
    }

    /// Returns a copy of this membership with the retired mark cleared.
    pub fn unretire(&self) -> Self {
        Self {
            retired: false,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for ClusterMembership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.cluster, self.index)?;
        if self.retired {
            write!(f, "/retired")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership() -> ClusterMembership {
        ClusterMembership::new(ClusterId::new("container").unwrap(), 4)
    }

    #[test]
    fn test_new_membership_is_unretired() {
        let m = membership();
        assert_eq!(m.cluster().as_str(), "container");
        assert_eq!(m.index(), 4);
        assert!(!m.retired());
    }

    #[test]
    fn test_retire_preserves_cluster_and_index() {
        let m = membership();
        let retired = m.retire();
        assert!(retired.retired());
        assert_eq!(retired.cluster(), m.cluster());
        assert_eq!(retired.index(), m.index());
        // the original is untouched
        assert!(!m.retired());
    }

    #[test]
    fn test_unretire_clears_the_mark() {
        let m = membership().retire().unretire();
        assert!(!m.retired());
        assert_eq!(m, membership());
    }

    #[test]
    fn test_retire_is_idempotent_on_value() {
        let once = membership().retire();
        let twice = once.retire();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_display_forms() {
        let m = membership();
        assert_eq!(format!("{m}"), "container/4");
        assert_eq!(format!("{}", m.retire()), "container/4/retired");
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = membership().retire();
        let json = serde_json::to_string(&m).unwrap();
        let back: ClusterMembership = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_deserialize_rejects_empty_cluster_name() {
        let json = r#"{"cluster":"","index":0,"retired":false}"#;
        let result: Result<ClusterMembership, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
