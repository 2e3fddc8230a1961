//! # Node Lifecycle States
//!
//! The eight states a node moves through from provisioning to recycling.
//! The model does not hard-code a transition graph; the orchestrator
//! decides when a node moves, and this crate guarantees that whatever
//! move it makes leaves the node value internally consistent (see
//! [`Node::with_state`](crate::node::Node::with_state)).
//!
//! ## Typical Flow
//!
//! ```text
//! provisioned ──▶ ready ──▶ reserved ──▶ active ──▶ inactive
//!                   ▲                                   │
//!                   └───────────── dirty ◀──────────────┘
//!
//! any state ──▶ failed ──▶ dirty | parked     (fault handling)
//! any state ──▶ parked                        (manual exclusion)
//! ```
//!
//! A node is *allocated* in exactly five of the eight states: reserved,
//! active, inactive, failed, and parked. Failed and parked nodes keep
//! their allocation so that the owning application can be identified
//! during diagnosis.

use serde::{Deserialize, Serialize};

/// The lifecycle state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Requested from the infrastructure provider but not yet ready for use.
    Provisioned,
    /// Free and ready to be reserved by an application.
    Ready,
    /// Claimed by an application but not yet serving it.
    Reserved,
    /// In active use by an application.
    Active,
    /// Stopped, but still allocated to an application and retaining the
    /// data needed for its allocated role.
    Inactive,
    /// Not allocated, and possibly holding data that must be cleaned
    /// before the node is ready again.
    Dirty,
    /// Failed and awaiting repair or removal. Allocation data is retained
    /// for diagnosis.
    Failed,
    /// Withdrawn from use by an operator. Follows the same rules as
    /// failed, except the node is never automatically moved out of this
    /// state.
    Parked,
}

impl State {
    /// Returns all states in canonical order.
    pub fn all() -> &'static [State] {
        &[
            Self::Provisioned,
            Self::Ready,
            Self::Reserved,
            Self::Active,
            Self::Inactive,
            Self::Dirty,
            Self::Failed,
            Self::Parked,
        ]
    }

    /// Whether a node in this state is assigned to an application.
    ///
    /// Every node in an allocated state carries an `Allocation`; the
    /// constructor and all transitions uphold this.
    pub fn is_allocated(&self) -> bool {
        matches!(
            self,
            Self::Reserved | Self::Active | Self::Inactive | Self::Failed | Self::Parked
        )
    }

    /// Looks up a state by its lowercase name, as produced by
    /// [`State::as_str`]. Returns `None` for an unknown name.
    pub fn from_name(name: &str) -> Option<State> {
        Self::all().iter().copied().find(|s| s.as_str() == name)
    }

    /// Returns the lowercase string identifier for this state.
    ///
    /// This matches the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provisioned => "provisioned",
            Self::Ready => "ready",
            Self::Reserved => "reserved",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Dirty => "dirty",
            Self::Failed => "failed",
            Self::Parked => "parked",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
