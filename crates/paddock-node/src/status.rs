//! # Node Status
//!
//! Ephemeral operational facts that ride along with a node: the reboot
//! generation, how many consecutive health checks have failed, and
//! whether a hardware fault has been diagnosed. Status never affects
//! identity or equality; it is advisory data for the orchestrator's
//! fail-and-recover policies.

use serde::{Deserialize, Serialize};

use crate::generation::Generation;

/// Operational status of a node.
///
/// Values are immutable; the `with_*` methods return modified copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Status {
    reboot_generation: Generation,
    fail_count: u32,
    hardware_failure: bool,
}

impl Status {
    /// The status a freshly provisioned node starts with.
    pub fn initial() -> Self {
        Self {
            reboot_generation: Generation::initial(),
            fail_count: 0,
            hardware_failure: false,
        }
    }

    /// Reconstruct a status from stored fields.
    pub fn new(reboot_generation: Generation, fail_count: u32, hardware_failure: bool) -> Self {
        Self {
            reboot_generation,
            fail_count,
            hardware_failure,
        }
    }

    /// The reboot generation commanding host reboots.
    pub fn reboot_generation(&self) -> Generation {
        self.reboot_generation
    }

    /// The number of consecutive failed health checks.
    pub fn fail_count(&self) -> u32 {
        self.fail_count
    }

    /// Whether a hardware fault has been diagnosed on this node.
    pub fn hardware_failure(&self) -> bool {
        self.hardware_failure
    }

    /// Returns a copy with the reboot generation replaced.
    pub fn with_reboot(&self, generation: Generation) -> Self {
        Self {
            reboot_generation: generation,
            ..*self
        }
    }

    /// Returns a copy with the failure count replaced.
    pub fn with_fail_count(&self, count: u32) -> Self {
        Self {
            fail_count: count,
            ..*self
        }
    }

    /// Returns a copy with the failure count increased by one.
    pub fn with_increased_fail_count(&self) -> Self {
        Self {
            fail_count: self.fail_count.saturating_add(1),
            ..*self
        }
    }

    /// Returns a copy with the failure count decreased by one, stopping
    /// at zero.
    pub fn with_decreased_fail_count(&self) -> Self {
        Self {
            fail_count: self.fail_count.saturating_sub(1),
            ..*self
        }
    }

    /// Returns a copy with the hardware failure flag replaced.
    pub fn with_hardware_failure(&self, failed: bool) -> Self {
        Self {
            hardware_failure: failed,
            ..*self
        }
    }
}
