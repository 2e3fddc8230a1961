//! # Node Type Classification
//!
//! Defines the `NodeType` enum that classifies every node in the fleet.
//! This is the one definition used across the stack, so every `match` on
//! `NodeType` is exhaustive and adding a new type forces each consumer
//! to handle it at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// The role a node plays in the fleet.
///
/// The type is assigned when the node is provisioned and never changes
/// through ordinary lifecycle transitions. It determines which pool the
/// node is allocated from and which maintenance policies apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A node that runs tenant application workloads.
    Tenant,
    /// A physical host that carries tenant nodes as children.
    Host,
    /// A node that routes ingress traffic for the zone.
    Proxy,
}

impl NodeType {
    /// Returns all node types in canonical order.
    pub fn all() -> &'static [NodeType] {
        &[Self::Tenant, Self::Host, Self::Proxy]
    }

    /// Returns the lowercase string identifier for this type.
    ///
    /// This matches the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "tenant",
            Self::Host => "host",
            Self::Proxy => "proxy",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = ValidationError;

    /// Parse a node type from its lowercase string identifier.
    ///
    /// Accepts the same identifiers produced by [`NodeType::as_str()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tenant" => Ok(Self::Tenant),
            "host" => Ok(Self::Host),
            "proxy" => Ok(Self::Proxy),
            other => Err(ValidationError::UnknownNodeType(other.to_string())),
        }
    }
}
