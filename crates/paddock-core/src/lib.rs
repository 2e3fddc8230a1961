//! # paddock-core — Foundational Provisioning Types
//!
//! This crate is the bedrock of Paddock. It defines the vocabulary shared
//! by everything that talks about deployments: who owns a node, which
//! zone it lives in, which cluster it serves, and what role it plays.
//! Every other crate in the workspace depends on `paddock-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** [`ApplicationId`], [`ZoneId`],
//!    and [`ClusterId`] are validated newtypes. No bare strings for
//!    identifiers.
//!
//! 2. **Validation at every boundary.** Construction validates, and
//!    deserialization routes through the same validation, so a value of
//!    an identifier type is well-formed wherever it came from.
//!
//! 3. **Single `NodeType` enum.** One definition, exhaustive `match`
//!    everywhere. Adding a node type forces every consumer to handle it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `paddock-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod membership;
pub mod node_type;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use identity::{ApplicationId, ClusterId, ZoneId};
pub use membership::ClusterMembership;
pub use node_type::NodeType;
