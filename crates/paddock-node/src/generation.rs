//! # Commanded-Work Generations
//!
//! A [`Generation`] is a wanted/current counter pair used to command
//! restarts and reboots without the fleet manager having to remember
//! in-flight work. The orchestrator raises `wanted` to command another
//! round; the agent on the node raises `current` when it has complied.
//! The counters are equal exactly when nothing is outstanding.

use serde::{Deserialize, Serialize};

/// A wanted/current counter pair for commanded work.
///
/// Values are immutable; the `with_*` methods return modified copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Generation {
    wanted: u64,
    current: u64,
}

impl Generation {
    /// The generation a freshly provisioned node starts with: nothing
    /// wanted, nothing done.
    pub fn initial() -> Self {
        Self {
            wanted: 0,
            current: 0,
        }
    }

    /// Reconstruct a generation from stored counters.
    pub fn new(wanted: u64, current: u64) -> Self {
        Self { wanted, current }
    }

    /// The round of work the orchestrator has asked for.
    pub fn wanted(&self) -> u64 {
        self.wanted
    }

    /// The round of work the node has reported complete.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Returns a copy with the wanted counter replaced.
    pub fn with_wanted(&self, wanted: u64) -> Self {
        Self { wanted, ..*self }
    }

    /// Returns a copy with the current counter replaced.
    pub fn with_current(&self, current: u64) -> Self {
        Self { current, ..*self }
    }

    /// True while commanded work is outstanding.
    pub fn pending(&self) -> bool {
        self.wanted > self.current
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wanted={} current={}", self.wanted, self.current)
    }
}
