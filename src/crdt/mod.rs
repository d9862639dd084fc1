//! CRDT (Conflict-free Replicated Data Type) implementation module.
//!
//! This module contains the RGA (Replicated Growable Array) CRDT
//! implementation and all its supporting types and structures.

pub mod node;
pub mod rga;
pub mod types;

// Re-export the main public API
pub use node::RgaNode;
pub use rga::{EventCmpFn, FingerprintFn, Rga};
pub use types::{Event, NodeId};
