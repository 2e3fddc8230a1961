//! # paddock-node — The Node Lifecycle Model
//!
//! The authoritative model of a node in a hosted compute fleet: which
//! lifecycle state it occupies, which application owns it, its
//! operational status, and the history of events that happened to it.
//!
//! Everything here is an immutable value. Transitions take `&self` and
//! return a new [`Node`], so a snapshot handed to one reader is never
//! changed by another writer. The orchestrator that decides *when* nodes
//! move between states lives outside this crate; this crate guarantees
//! that every node value it can produce is internally consistent,
//! whichever transition produced it.
//!
//! ## Modules
//!
//! - **Node** (`node.rs`): the aggregate root and its transitions,
//!   including allocation, retirement, liveness, and state moves.
//! - **State** (`state.rs`): the eight lifecycle states and the
//!   allocated/unallocated split.
//! - **Allocation** (`allocation.rs`): ownership by an application,
//!   cluster membership, restart generation, removability.
//! - **History** (`history.rs`): the append-only event log.
//! - **Status** (`status.rs`) and **Generation** (`generation.rs`):
//!   operational counters.
//! - **Flavor** (`flavor.rs`): the provisioned hardware configuration.
//!
//! ## Design
//!
//! The single structural invariant is allocation presence: a node in an
//! allocated state always carries an [`Allocation`]. It is enforced at
//! construction, on every state move, and at deserialization. Everything
//! else about the transition graph is policy, decided by the caller.

pub mod allocation;
pub mod flavor;
pub mod generation;
pub mod history;
pub mod node;
pub mod state;
pub mod status;

// ─── Re-exports ──────────────────────────────────────────────────────

pub use allocation::Allocation;
pub use flavor::Flavor;
pub use generation::Generation;
pub use history::{Agent, Event, EventKind, History};
pub use node::{IllegalStateError, InvalidNodeError, Node};
pub use state::State;
pub use status::Status;
