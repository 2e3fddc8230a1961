//! # The Node Aggregate
//!
//! A node in the fleet, with its lifecycle state, ownership, status, and
//! event history. The identity of a node is its id, which in this design
//! equals its hostname. This type (and hence everything referenced from
//! it) is immutable: every transition takes `&self` and returns a new
//! `Node` value, so snapshots held elsewhere never change underfoot.
//!
//! The orchestrator decides *when* a node moves between states; this
//! module guarantees that whatever move it makes produces an internally
//! consistent value. The one structural invariant is allocation
//! presence: a node in an allocated state always carries an
//! [`Allocation`], enforced at construction, on every state move, and at
//! deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use paddock_core::{ApplicationId, ClusterMembership, NodeType};

use crate::allocation::Allocation;
use crate::flavor::Flavor;
use crate::generation::Generation;
use crate::history::{Agent, Event, EventKind, History};
use crate::state::State;
use crate::status::Status;

// ─── Errors ──────────────────────────────────────────────────────────

/// A node value could not be constructed because a required field was
/// missing or blank.
///
/// Raised at construction, at deserialization, and by the field
/// replacements that rerun construction-time validation. The message
/// names the offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid node: {0}")]
pub struct InvalidNodeError(pub String);

/// A transition was attempted that the node's current shape cannot
/// support, such as retiring a node that carries no allocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("illegal node state: {0}")]
pub struct IllegalStateError(pub String);

// ─── Node ────────────────────────────────────────────────────────────

/// A node in the fleet.
///
/// Equality and hashing consider only the node's id, so two snapshots of
/// the same host taken before and after a transition compare equal. Use
/// field accessors to compare contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
    hostname: String,
    ip_address: String,
    openstack_id: String,
    parent_hostname: Option<String>,
    flavor: Flavor,
    status: Status,
    state: State,
    node_type: NodeType,
    allocation: Option<Allocation>,
    history: History,
}

/// The unvalidated shape of a serialized node. Deserialization routes
/// through [`Node::new`] so that no inconsistent node can be
/// reconstructed from storage.
#[derive(Deserialize)]
struct RawNode {
    hostname: String,
    ip_address: String,
    openstack_id: String,
    parent_hostname: Option<String>,
    flavor: Flavor,
    status: Status,
    state: State,
    node_type: NodeType,
    allocation: Option<Allocation>,
    history: History,
}

impl TryFrom<RawNode> for Node {
    type Error = InvalidNodeError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        Node::new(
            raw.openstack_id,
            raw.ip_address,
            raw.hostname,
            raw.parent_hostname,
            raw.flavor,
            raw.status,
            raw.state,
            raw.allocation,
            raw.history,
            raw.node_type,
        )
    }
}

fn require_non_blank(value: &str, message: &str) -> Result<(), InvalidNodeError> {
    if value.trim().is_empty() {
        return Err(InvalidNodeError(format!(
            "{message}, but it was {value:?}"
        )));
    }
    Ok(())
}

impl Node {
    /// Creates a node in the initial state (provisioned): default
    /// status, no allocation, empty history.
    pub fn create(
        openstack_id: impl Into<String>,
        ip_address: impl Into<String>,
        hostname: impl Into<String>,
        parent_hostname: Option<String>,
        flavor: Flavor,
        node_type: NodeType,
    ) -> Result<Node, InvalidNodeError> {
        Node::new(
            openstack_id,
            ip_address,
            hostname,
            parent_hostname,
            flavor,
            Status::initial(),
            State::Provisioned,
            None,
            History::empty(),
            node_type,
        )
    }

    /// Reconstructs a node from its full field set, validating it.
    ///
    /// This is the path the persistence layer uses. New nodes should be
    /// made with [`Node::create`] and evolved through the transition
    /// methods.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNodeError`] if an identity field is blank, if
    /// the parent hostname is present but blank, or if `state` is an
    /// allocated state and `allocation` is `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        openstack_id: impl Into<String>,
        ip_address: impl Into<String>,
        hostname: impl Into<String>,
        parent_hostname: Option<String>,
        flavor: Flavor,
        status: Status,
        state: State,
        allocation: Option<Allocation>,
        history: History,
        node_type: NodeType,
    ) -> Result<Node, InvalidNodeError> {
        let openstack_id = openstack_id.into();
        let ip_address = ip_address.into();
        let hostname = hostname.into();
        require_non_blank(&openstack_id, "a node must have an openstack id")?;
        require_non_blank(&ip_address, "a node must have an ip address")?;
        require_non_blank(&hostname, "a node must have a hostname")?;
        if let Some(parent) = &parent_hostname {
            require_non_blank(parent, "a parent hostname must be a proper value")?;
        }
        if state.is_allocated() && allocation.is_none() {
            return Err(InvalidNodeError(format!(
                "node {hostname} is in state {state} but has no allocation"
            )));
        }
        Ok(Node {
            hostname,
            ip_address,
            openstack_id,
            parent_hostname,
            flavor,
            status,
            state,
            node_type,
            allocation,
            history,
        })
    }

    // ─── Accessors ───────────────────────────────────────────────────

    /// The unique id of this node. Equals the hostname in this design.
    pub fn id(&self) -> &str {
        &self.hostname
    }

    /// The host name of this node.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The IP address of this node.
    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    /// The infrastructure provider's id for this node, or for its host
    /// if this is a virtual node.
    pub fn openstack_id(&self) -> &str {
        &self.openstack_id
    }

    /// The hostname of the physical host carrying this node, if this
    /// node is a container or VM.
    pub fn parent_hostname(&self) -> Option<&str> {
        self.parent_hostname.as_deref()
    }

    /// The hardware flavor this node was provisioned with.
    pub fn flavor(&self) -> &Flavor {
        &self.flavor
    }

    /// The node's ephemeral operational status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The current state of this node in the lifecycle state machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// The role this node plays in the fleet.
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// The current allocation of this node, if any.
    pub fn allocation(&self) -> Option<&Allocation> {
        self.allocation.as_ref()
    }

    /// The history of events that happened to this node.
    pub fn history(&self) -> &History {
        &self.history
    }

    // ─── Allocation and retirement ───────────────────────────────────

    /// Returns a copy of this node allocated to the given application,
    /// with a fresh restart generation, and a `reserved` event stamped
    /// at `at`. The node's `state` is *not* changed: moving to an
    /// allocated state is a separate step the orchestrator takes, and
    /// readers that assume state and allocation move atomically must
    /// wait for that step.
    pub fn allocate(
        &self,
        owner: ApplicationId,
        membership: ClusterMembership,
        at: DateTime<Utc>,
    ) -> Node {
        Node {
            allocation: Some(Allocation::new(owner, membership)),
            history: self.history.with(Event::Reserved { at }),
            ..self.clone()
        }
    }

    /// Returns a copy of this node retired by the application owning it.
    /// If the node is already retired it is returned as-is, with no new
    /// history event.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError`] if the node has no allocation.
    pub fn retire_by_application(&self, at: DateTime<Utc>) -> Result<Node, IllegalStateError> {
        let allocation = self.require_allocation(&format!("retire {}", self.hostname))?;
        if allocation.membership().retired() {
            return Ok(self.clone());
        }
        Ok(Node {
            allocation: Some(allocation.retire()),
            history: self.history.with(Event::Retired {
                at,
                agent: Agent::Application,
            }),
            ..self.clone()
        })
    }

    /// Returns a copy of this node retired by the fleet manager, for
    /// example to drain a flavor from the fleet.
    ///
    /// Unlike [`Node::retire_by_application`] this does not check
    /// whether the node is already retired, and stamps a new retirement
    /// event on every call.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError`] if the node has no allocation.
    pub fn retire_by_system(&self, at: DateTime<Utc>) -> Result<Node, IllegalStateError> {
        let allocation = self.require_allocation(&format!("retire {}", self.hostname))?;
        Ok(Node {
            allocation: Some(allocation.retire()),
            history: self.history.with(Event::Retired {
                at,
                agent: Agent::System,
            }),
            ..self.clone()
        })
    }

    /// Returns a copy of this node that is not retired. Past retirement
    /// events stay in the history.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError`] if the node has no allocation.
    pub fn unretire(&self) -> Result<Node, IllegalStateError> {
        let allocation = self.require_allocation(&format!("unretire {}", self.hostname))?;
        Ok(Node {
            allocation: Some(allocation.unretire()),
            ..self.clone()
        })
    }

    // ─── Commanded work ──────────────────────────────────────────────

    /// Returns a copy of this node with the restart generation of its
    /// allocation set to `generation`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError`] if the node has no allocation;
    /// restarts are commanded per application process, so they make no
    /// sense on an unallocated node.
    pub fn with_restart(&self, generation: Generation) -> Result<Node, IllegalStateError> {
        let allocation = self.require_allocation(&format!(
            "set restart generation for {}",
            self.hostname
        ))?;
        Ok(Node {
            allocation: Some(allocation.with_restart(generation)),
            ..self.clone()
        })
    }

    /// Returns a copy of this node with the reboot generation of its
    /// status set to `generation`. Reboots apply to the host itself, so
    /// no allocation is required.
    pub fn with_reboot(&self, generation: Generation) -> Node {
        Node {
            status: self.status.with_reboot(generation),
            ..self.clone()
        }
    }

    // ─── Liveness ────────────────────────────────────────────────────

    /// Returns a copy of this node with a history record saying it was
    /// detected to be down at `instant`.
    pub fn down_at(&self, instant: DateTime<Utc>) -> Node {
        Node {
            history: self.history.with(Event::Down { at: instant }),
            ..self.clone()
        }
    }

    /// Returns a copy of this node with every record of it having been
    /// detected down removed.
    pub fn up(&self) -> Node {
        Node {
            history: self.history.without(EventKind::Down),
            ..self.clone()
        }
    }

    // ─── State moves ─────────────────────────────────────────────────

    /// Returns a copy of this node in the given state.
    ///
    /// Moving to an unallocated state discharges the allocation; moving
    /// between allocated states keeps it.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError`] if `state` is an allocated state
    /// and the node carries no allocation.
    pub fn with_state(&self, state: State) -> Result<Node, IllegalStateError> {
        if state.is_allocated() && self.allocation.is_none() {
            return Err(IllegalStateError(format!(
                "cannot move {} to {state}: the node is unallocated",
                self.hostname
            )));
        }
        let allocation = if state.is_allocated() {
            self.allocation.clone()
        } else {
            None
        };
        Ok(Node {
            state,
            allocation,
            ..self.clone()
        })
    }

    // ─── Field replacement ───────────────────────────────────────────

    /// Returns a copy of this node with the status replaced.
    pub fn with_status(&self, status: Status) -> Node {
        Node {
            status,
            ..self.clone()
        }
    }

    /// Returns a copy of this node with the flavor replaced.
    pub fn with_flavor(&self, flavor: Flavor) -> Node {
        Node {
            flavor,
            ..self.clone()
        }
    }

    /// Returns a copy of this node with the type replaced.
    pub fn with_node_type(&self, node_type: NodeType) -> Node {
        Node {
            node_type,
            ..self.clone()
        }
    }

    /// Returns a copy of this node with the allocation replaced.
    ///
    /// Do not use this to allocate a node; use [`Node::allocate`], which
    /// also stamps the `reserved` event.
    pub fn with_allocation(&self, allocation: Allocation) -> Node {
        Node {
            allocation: Some(allocation),
            ..self.clone()
        }
    }

    /// Returns a copy of this node with the given history.
    pub fn with_history(&self, history: History) -> Node {
        Node {
            history,
            ..self.clone()
        }
    }

    /// Returns a copy of this node with the parent hostname assigned.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNodeError`] if the parent hostname is blank.
    pub fn with_parent_hostname(
        &self,
        parent_hostname: impl Into<String>,
    ) -> Result<Node, InvalidNodeError> {
        let parent = parent_hostname.into();
        require_non_blank(&parent, "a parent hostname must be a proper value")?;
        Ok(Node {
            parent_hostname: Some(parent),
            ..self.clone()
        })
    }

    fn require_allocation(&self, action: &str) -> Result<&Allocation, IllegalStateError> {
        self.allocation
            .as_ref()
            .ok_or_else(|| IllegalStateError(format!("cannot {action}: the node is unallocated")))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} node {}", self.state, self.hostname)?;
        if let Some(allocation) = &self.allocation {
            write!(f, " {allocation}")?;
        }
        if let Some(parent) = &self.parent_hostname {
            write!(f, " [on: {parent}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use paddock_core::ClusterId;

    fn t(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, secs).unwrap()
    }

    fn host() -> Node {
        Node::create(
            "os-1",
            "10.0.0.1",
            "host-1",
            None,
            Flavor::new("d-8-16-100"),
            NodeType::Host,
        )
        .unwrap()
    }

    fn owner() -> ApplicationId {
        ApplicationId::new("acme", "checkout", "default").unwrap()
    }

    fn membership() -> ClusterMembership {
        ClusterMembership::new(ClusterId::new("container").unwrap(), 0)
    }

    /// A node that has been allocated and moved to reserved.
    fn reserved() -> Node {
        host()
            .allocate(owner(), membership(), t(0))
            .with_state(State::Reserved)
            .unwrap()
    }

    // ── construction ─────────────────────────────────────────────────

    #[test]
    fn test_create_starts_provisioned_and_unallocated() {
        let n = host();
        assert_eq!(n.state(), State::Provisioned);
        assert!(n.allocation().is_none());
        assert!(n.history().is_empty());
        assert_eq!(n.status(), Status::initial());
        assert_eq!(n.node_type(), NodeType::Host);
        assert_eq!(n.flavor().name(), "d-8-16-100");
        assert!(n.parent_hostname().is_none());
    }

    #[test]
    fn test_create_rejects_blank_identity_fields() {
        let flavor = Flavor::new("f");
        let e = Node::create("", "10.0.0.1", "host-1", None, flavor.clone(), NodeType::Host)
            .unwrap_err();
        assert!(e.to_string().contains("openstack id"));
        let e = Node::create("os-1", "  ", "host-1", None, flavor.clone(), NodeType::Host)
            .unwrap_err();
        assert!(e.to_string().contains("ip address"));
        let e = Node::create("os-1", "10.0.0.1", "", None, flavor, NodeType::Host).unwrap_err();
        assert!(e.to_string().contains("hostname"));
    }

    #[test]
    fn test_create_rejects_blank_parent_hostname() {
        let result = Node::create(
            "os-1",
            "10.0.0.1",
            "node-1",
            Some(" ".to_string()),
            Flavor::new("f"),
            NodeType::Tenant,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_accepts_a_parent_hostname() {
        let n = Node::create(
            "os-2",
            "10.0.0.2",
            "node-1",
            Some("host-1".to_string()),
            Flavor::new("f"),
            NodeType::Tenant,
        )
        .unwrap();
        assert_eq!(n.parent_hostname(), Some("host-1"));
    }

    #[test]
    fn test_new_rejects_allocated_state_without_allocation() {
        let result = Node::new(
            "os-1",
            "10.0.0.1",
            "host-1",
            None,
            Flavor::new("f"),
            Status::initial(),
            State::Active,
            None,
            History::empty(),
            NodeType::Host,
        );
        let e = result.unwrap_err();
        assert!(e.to_string().contains("active"));
        assert!(e.to_string().contains("no allocation"));
    }

    #[test]
    fn test_new_accepts_allocated_state_with_allocation() {
        let n = Node::new(
            "os-1",
            "10.0.0.1",
            "host-1",
            None,
            Flavor::new("f"),
            Status::initial(),
            State::Active,
            Some(Allocation::new(owner(), membership())),
            History::empty(),
            NodeType::Host,
        )
        .unwrap();
        assert_eq!(n.state(), State::Active);
        assert!(n.allocation().is_some());
    }

    // ── identity ─────────────────────────────────────────────────────

    #[test]
    fn test_identity_is_the_hostname() {
        let n = host();
        assert_eq!(n.id(), "host-1");
        assert_eq!(n.id(), n.hostname());
    }

    #[test]
    fn test_equality_considers_only_the_id() {
        let a = host();
        let b = Node::create(
            "os-other",
            "10.9.9.9",
            "host-1",
            None,
            Flavor::new("other"),
            NodeType::Proxy,
        )
        .unwrap();
        assert_eq!(a, b);
        let c = Node::create(
            "os-1",
            "10.0.0.1",
            "host-2",
            None,
            Flavor::new("d-8-16-100"),
            NodeType::Host,
        )
        .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_snapshots_of_the_same_node_compare_equal() {
        let before = reserved();
        let after = before.retire_by_application(t(1)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_hash_follows_equality() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(host());
        set.insert(reserved()); // same hostname, later lifecycle
        assert_eq!(set.len(), 1);
    }

    // ── allocation ───────────────────────────────────────────────────

    #[test]
    fn test_allocate_binds_ownership_without_changing_state() {
        let n = host().allocate(owner(), membership(), t(0));
        assert_eq!(n.state(), State::Provisioned);
        let allocation = n.allocation().unwrap();
        assert_eq!(allocation.owner(), &owner());
        assert_eq!(allocation.restart_generation(), Generation::initial());
        assert!(!allocation.removable());
        assert!(!allocation.membership().retired());
        assert_eq!(n.history().len(), 1);
        let event = n.history().event(EventKind::Reserved).unwrap();
        assert_eq!(event.at(), t(0));
    }

    #[test]
    fn test_allocate_does_not_mutate_the_original() {
        let n0 = host();
        let _n1 = n0.allocate(owner(), membership(), t(0));
        assert!(n0.allocation().is_none());
        assert!(n0.history().is_empty());
    }

    // ── retirement ───────────────────────────────────────────────────

    #[test]
    fn test_retire_by_application_marks_and_records() {
        let n = reserved().retire_by_application(t(1)).unwrap();
        assert!(n.allocation().unwrap().membership().retired());
        let event = n.history().event(EventKind::Retired).unwrap();
        assert_eq!(event.at(), t(1));
        assert!(matches!(
            event,
            Event::Retired {
                agent: Agent::Application,
                ..
            }
        ));
    }

    #[test]
    fn test_retire_by_application_is_idempotent() {
        let n2 = reserved().retire_by_application(t(1)).unwrap();
        let n3 = n2.retire_by_application(t(2)).unwrap();
        assert_eq!(n3.history().len(), n2.history().len());
        assert_eq!(n3.history(), n2.history());
        assert_eq!(n3.allocation(), n2.allocation());
    }

    #[test]
    fn test_retire_by_system_always_appends() {
        let n = reserved()
            .retire_by_system(t(1))
            .unwrap()
            .retire_by_system(t(2))
            .unwrap();
        let retired: Vec<_> = n
            .history()
            .events()
            .iter()
            .filter(|e| e.kind() == EventKind::Retired)
            .collect();
        assert_eq!(retired.len(), 2);
        for event in retired {
            assert!(matches!(
                event,
                Event::Retired {
                    agent: Agent::System,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_retire_unallocated_fails() {
        let e = host().retire_by_application(t(0)).unwrap_err();
        assert!(e.to_string().contains("unallocated"));
        assert!(host().retire_by_system(t(0)).is_err());
    }

    #[test]
    fn test_unretire_clears_the_mark_but_keeps_history() {
        let n = reserved()
            .retire_by_application(t(1))
            .unwrap()
            .unretire()
            .unwrap();
        assert!(!n.allocation().unwrap().membership().retired());
        assert!(n.history().has(EventKind::Retired));
    }

    #[test]
    fn test_unretire_unallocated_fails() {
        assert!(host().unretire().is_err());
    }

    // ── restart and reboot ───────────────────────────────────────────

    #[test]
    fn test_with_restart_replaces_the_generation() {
        let n = reserved().with_restart(Generation::new(1, 0)).unwrap();
        assert_eq!(
            n.allocation().unwrap().restart_generation(),
            Generation::new(1, 0)
        );
    }

    #[test]
    fn test_with_restart_requires_allocation() {
        let e = host().with_restart(Generation::new(1, 0)).unwrap_err();
        assert_eq!(
            e.to_string(),
            "illegal node state: cannot set restart generation for host-1: the node is unallocated"
        );
    }

    #[test]
    fn test_with_reboot_needs_no_allocation() {
        let n = host().with_reboot(Generation::new(2, 1));
        assert_eq!(n.status().reboot_generation(), Generation::new(2, 1));
        assert!(n.allocation().is_none());
    }

    // ── liveness ─────────────────────────────────────────────────────

    #[test]
    fn test_down_at_appends_a_down_event() {
        let n = host().down_at(t(3));
        assert_eq!(n.history().len(), 1);
        assert_eq!(n.history().event(EventKind::Down).unwrap().at(), t(3));
    }

    #[test]
    fn test_up_removes_all_down_events_and_keeps_the_rest() {
        let n = reserved().down_at(t(1)).down_at(t(2)).up();
        assert!(!n.history().has(EventKind::Down));
        assert!(n.history().has(EventKind::Reserved));
        assert_eq!(n.history().len(), 1);
    }

    #[test]
    fn test_down_up_down_leaves_one_down_event() {
        let n = host().down_at(t(1)).up().down_at(t(5));
        assert_eq!(n.history().len(), 1);
        assert_eq!(n.history().event(EventKind::Down).unwrap().at(), t(5));
    }

    // ── state moves ──────────────────────────────────────────────────

    #[test]
    fn test_with_state_to_allocated_requires_allocation() {
        let e = host().with_state(State::Reserved).unwrap_err();
        assert!(e.to_string().contains("reserved"));
        assert!(e.to_string().contains("unallocated"));
    }

    #[test]
    fn test_with_state_to_unallocated_discharges_the_allocation() {
        let n = reserved().with_state(State::Dirty).unwrap();
        assert_eq!(n.state(), State::Dirty);
        assert!(n.allocation().is_none());
        // history survives the discharge
        assert!(n.history().has(EventKind::Reserved));
    }

    #[test]
    fn test_with_state_between_allocated_states_keeps_the_allocation() {
        let n = reserved()
            .with_state(State::Active)
            .unwrap()
            .with_state(State::Failed)
            .unwrap();
        assert_eq!(n.state(), State::Failed);
        assert_eq!(n.allocation().unwrap().owner(), &owner());
    }

    #[test]
    fn test_with_state_accepts_every_unallocated_target() {
        for state in State::all().iter().filter(|s| !s.is_allocated()) {
            let n = host().with_state(*state).unwrap();
            assert_eq!(n.state(), *state);
        }
    }

    // ── field replacement ────────────────────────────────────────────

    #[test]
    fn test_with_status_replaces_exactly_that_field() {
        let status = Status::initial().with_increased_fail_count();
        let n = reserved().with_status(status);
        assert_eq!(n.status().fail_count(), 1);
        assert_eq!(n.state(), State::Reserved);
        assert!(n.allocation().is_some());
    }

    #[test]
    fn test_with_flavor_and_type() {
        let n = host()
            .with_flavor(Flavor::new("d-16-64-400"))
            .with_node_type(NodeType::Proxy);
        assert_eq!(n.flavor().name(), "d-16-64-400");
        assert_eq!(n.node_type(), NodeType::Proxy);
    }

    #[test]
    fn test_with_allocation_replaces_the_allocation() {
        let replacement = Allocation::new(
            ApplicationId::new("acme", "search", "default").unwrap(),
            membership(),
        );
        let n = reserved().with_allocation(replacement.clone());
        assert_eq!(n.allocation(), Some(&replacement));
        // no reserved event is stamped on plain replacement
        assert_eq!(n.history().len(), 1);
    }

    #[test]
    fn test_with_history_replaces_the_log() {
        let n = reserved().with_history(History::empty());
        assert!(n.history().is_empty());
    }

    #[test]
    fn test_with_parent_hostname_validates() {
        let n = host().with_parent_hostname("host-0").unwrap();
        assert_eq!(n.parent_hostname(), Some("host-0"));
        assert!(host().with_parent_hostname("  ").is_err());
    }

    // ── display ──────────────────────────────────────────────────────

    #[test]
    fn test_display_unallocated() {
        assert_eq!(format!("{}", host()), "provisioned node host-1");
    }

    #[test]
    fn test_display_with_allocation_and_parent() {
        let n = Node::create(
            "os-2",
            "10.0.0.2",
            "node-1",
            Some("host-1".to_string()),
            Flavor::new("f"),
            NodeType::Tenant,
        )
        .unwrap()
        .allocate(owner(), membership(), t(0))
        .with_state(State::Active)
        .unwrap();
        assert_eq!(
            format!("{n}"),
            "active node node-1 allocated to acme:checkout:default as container/0 [on: host-1]"
        );
    }

    // ── serde ────────────────────────────────────────────────────────

    #[test]
    fn test_serde_roundtrip_preserves_every_field() {
        let n = reserved()
            .retire_by_application(t(1))
            .unwrap()
            .down_at(t(2))
            .with_reboot(Generation::new(1, 0));
        let json = serde_json::to_string(&n).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hostname(), n.hostname());
        assert_eq!(back.ip_address(), n.ip_address());
        assert_eq!(back.openstack_id(), n.openstack_id());
        assert_eq!(back.parent_hostname(), n.parent_hostname());
        assert_eq!(back.flavor(), n.flavor());
        assert_eq!(back.status(), n.status());
        assert_eq!(back.state(), n.state());
        assert_eq!(back.node_type(), n.node_type());
        assert_eq!(back.allocation(), n.allocation());
        assert_eq!(back.history(), n.history());
    }

    #[test]
    fn test_deserialize_rejects_an_inconsistent_node() {
        let json = serde_json::to_string(&reserved()).unwrap();
        let broken = json.replace("\"allocation\":{", "\"allocation\":null,\"ignored\":{");
        let result: Result<Node, _> = serde_json::from_str(&broken);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_a_blank_hostname() {
        let json = serde_json::to_string(&host()).unwrap();
        let broken = json.replace("\"hostname\":\"host-1\"", "\"hostname\":\"\"");
        let result: Result<Node, _> = serde_json::from_str(&broken);
        assert!(result.is_err());
    }
}
