//! # Node Event History
//!
//! An append-only log of the lifecycle events that happened to a node,
//! kept with the node itself so that every snapshot carries its own
//! audit trail.
//!
//! ## Semantics
//!
//! - [`History::with`] appends; insertion order is preserved and events
//!   with equal timestamps are never reordered.
//! - [`History::without`] filters out every event of one kind. This is
//!   how liveness flip-flops are retracted: a node coming back up drops
//!   its `down` events rather than appending an `up` marker.
//! - No operation mutates an existing history. Snapshots referencing an
//!   older history are unaffected by later appends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Events ──────────────────────────────────────────────────────────

/// Who initiated a retirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    /// The application that owns the node asked for it to be retired,
    /// typically during a resize or migration it planned itself.
    Application,
    /// The fleet manager retired the node, typically to drain a flavor
    /// or a faulty host.
    System,
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Application => f.write_str("application"),
            Self::System => f.write_str("system"),
        }
    }
}

/// A timestamped lifecycle event.
///
/// Most events carry only the instant they happened. Retirement also
/// records the [`Agent`] that initiated it, which downstream tooling
/// uses to tell planned drains from application-driven resizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    /// The node was requested from the infrastructure provider.
    Provisioned {
        /// When the event happened.
        at: DateTime<Utc>,
    },
    /// The node became ready for use.
    Readied {
        /// When the event happened.
        at: DateTime<Utc>,
    },
    /// The node was reserved by an application.
    Reserved {
        /// When the event happened.
        at: DateTime<Utc>,
    },
    /// The node went into active service.
    Activated {
        /// When the event happened.
        at: DateTime<Utc>,
    },
    /// The node was taken out of active service.
    Deactivated {
        /// When the event happened.
        at: DateTime<Utc>,
    },
    /// The node was moved to the failed state.
    Failed {
        /// When the event happened.
        at: DateTime<Utc>,
    },
    /// The node was detected to be down by health checking.
    Down {
        /// When the event happened.
        at: DateTime<Utc>,
    },
    /// The node was marked retired.
    Retired {
        /// When the event happened.
        at: DateTime<Utc>,
        /// Who initiated the retirement.
        agent: Agent,
    },
}

impl Event {
    /// The kind tag of this event, used for type-indexed filtering.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Provisioned { .. } => EventKind::Provisioned,
            Self::Readied { .. } => EventKind::Readied,
            Self::Reserved { .. } => EventKind::Reserved,
            Self::Activated { .. } => EventKind::Activated,
            Self::Deactivated { .. } => EventKind::Deactivated,
            Self::Failed { .. } => EventKind::Failed,
            Self::Down { .. } => EventKind::Down,
            Self::Retired { .. } => EventKind::Retired,
        }
    }

    /// When this event happened.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Provisioned { at }
            | Self::Readied { at }
            | Self::Reserved { at }
            | Self::Activated { at }
            | Self::Deactivated { at }
            | Self::Failed { at }
            | Self::Down { at }
            | Self::Retired { at, .. } => *at,
        }
    }
}

/// The kind tag of an [`Event`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Requested from the infrastructure provider.
    Provisioned,
    /// Became ready for use.
    Readied,
    /// Reserved by an application.
    Reserved,
    /// Went into active service.
    Activated,
    /// Taken out of active service.
    Deactivated,
    /// Moved to the failed state.
    Failed,
    /// Detected down by health checking.
    Down,
    /// Marked retired.
    Retired,
}

impl EventKind {
    /// Returns the lowercase string identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provisioned => "provisioned",
            Self::Readied => "readied",
            Self::Reserved => "reserved",
            Self::Activated => "activated",
            Self::Deactivated => "deactivated",
            Self::Failed => "failed",
            Self::Down => "down",
            Self::Retired => "retired",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── History ─────────────────────────────────────────────────────────

/// The ordered event log of a node.
///
/// All operations are total: appending and filtering never fail,
/// whatever the event or kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct History {
    events: Vec<Event>,
}

impl History {
    /// An empty history, as carried by a freshly provisioned node.
    pub fn empty() -> Self {
        Self { events: Vec::new() }
    }

    /// Returns a copy of this history with the event appended.
    pub fn with(&self, event: Event) -> Self {
        let mut events = self.events.clone();
        events.push(event);
        Self { events }
    }

    /// Returns a copy of this history with every event of the given kind
    /// removed. The relative order of the remaining events is preserved.
    pub fn without(&self, kind: EventKind) -> Self {
        Self {
            events: self
                .events
                .iter()
                .filter(|e| e.kind() != kind)
                .cloned()
                .collect(),
        }
    }

    /// The most recently appended event of the given kind, if any.
    pub fn event(&self, kind: EventKind) -> Option<&Event> {
        self.events.iter().rev().find(|e| e.kind() == kind)
    }

    /// Whether any event of the given kind has been recorded.
    pub fn has(&self, kind: EventKind) -> bool {
        self.events.iter().any(|e| e.kind() == kind)
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
