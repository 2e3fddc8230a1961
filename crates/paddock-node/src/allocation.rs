//! # Node Allocation
//!
//! The ownership record attached to a node while an application holds
//! it: who owns it, where it sits in the owner's cluster, the restart
//! generation commanding process restarts, and whether the orchestrator
//! may remove it.
//!
//! An allocation is attached by [`Node::allocate`](crate::node::Node::allocate)
//! and travels with the node through every allocated state, including
//! `failed` and `parked`, so that diagnosis can always name the owner.

use paddock_core::{ApplicationId, ClusterMembership};
use serde::{Deserialize, Serialize};

use crate::generation::Generation;

/// The current allocation of a node to an application.
///
/// Values are immutable; the `retire`, `unretire`, and `with_*` methods
/// return modified copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    owner: ApplicationId,
    membership: ClusterMembership,
    restart_generation: Generation,
    removable: bool,
}

impl Allocation {
    /// Create a fresh allocation: restart generation at its initial
    /// value, not removable.
    pub fn new(owner: ApplicationId, membership: ClusterMembership) -> Self {
        Self {
            owner,
            membership,
            restart_generation: Generation::initial(),
            removable: false,
        }
    }

    /// The application owning the node.
    pub fn owner(&self) -> &ApplicationId {
        &self.owner
    }

    /// The node's membership in the owner's cluster.
    pub fn membership(&self) -> &ClusterMembership {
        &self.membership
    }

    /// The restart generation commanding process restarts on the node.
    pub fn restart_generation(&self) -> Generation {
        self.restart_generation
    }

    /// Whether the orchestrator has cleared the node for removal from
    /// the cluster.
    pub fn removable(&self) -> bool {
        self.removable
    }

    /// Returns a copy of this allocation with the membership retired.
    pub fn retire(&self) -> Self {
        Self {
            membership: self.membership.retire(),
            ..self.clone()
        }
    }

    /// Returns a copy of this allocation with the membership unretired.
    pub fn unretire(&self) -> Self {
        Self {
            membership: self.membership.unretire(),
            ..self.clone()
        }
    }

    /// Returns a copy with the restart generation replaced.
    pub fn with_restart(&self, generation: Generation) -> Self {
        Self {
            restart_generation: generation,
            ..self.clone()
        }
    }

    /// Returns a copy with the removable flag replaced.
    pub fn with_removable(&self, removable: bool) -> Self {
        Self {
            removable,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "allocated to {} as {}", self.owner, self.membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::ClusterId;

    fn allocation() -> Allocation {
        let owner = ApplicationId::new("acme", "checkout", "default").unwrap();
        let membership = ClusterMembership::new(ClusterId::new("container").unwrap(), 4);
        Allocation::new(owner, membership)
    }

    #[test]
    fn test_new_allocation_defaults() {
        let a = allocation();
        assert_eq!(a.restart_generation(), Generation::initial());
        assert!(!a.removable());
        assert!(!a.membership().retired());
    }

    #[test]
    fn test_retire_marks_the_membership() {
        let a = allocation();
        let retired = a.retire();
        assert!(retired.membership().retired());
        assert_eq!(retired.owner(), a.owner());
        assert_eq!(retired.restart_generation(), a.restart_generation());
        // the original is untouched
        assert!(!a.membership().retired());
    }

    #[test]
    fn test_unretire_restores_the_membership() {
        let a = allocation().retire().unretire();
        assert_eq!(a, allocation());
    }

    #[test]
    fn test_with_restart_replaces_only_the_generation() {
        let a = allocation().retire().with_restart(Generation::new(2, 1));
        assert_eq!(a.restart_generation(), Generation::new(2, 1));
        assert!(a.membership().retired());
    }

    #[test]
    fn test_with_removable() {
        assert!(allocation().with_removable(true).removable());
    }

    #[test]
    fn test_display_names_owner_and_membership() {
        let a = allocation();
        assert_eq!(
            format!("{a}"),
            "allocated to acme:checkout:default as container/4"
        );
        assert_eq!(
            format!("{}", a.retire()),
            "allocated to acme:checkout:default as container/4/retired"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let a = allocation().retire().with_restart(Generation::new(1, 0));
        let json = serde_json::to_string(&a).unwrap();
        let back: Allocation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
