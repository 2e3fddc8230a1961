//! # Hardware Flavor
//!
//! The flavor a node was provisioned with, named after the provider's
//! catalog entry (e.g. `d-8-16-100`). The lifecycle model carries flavor
//! names without interpreting them; capacity planning lives elsewhere.

use serde::{Deserialize, Serialize};

/// The name of the hardware configuration a node was provisioned with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flavor(String);

impl Flavor {
    /// Create a flavor from the provider's catalog name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The catalog name of this flavor.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
