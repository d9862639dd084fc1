//! Node definition for the RGA CRDT.
//!
//! This module contains [`RgaNode`], the unit stored at each key of an
//! [`crate::crdt::Rga`]'s map.

use crate::crdt::types::{Event, NodeId};

/// A single element of an RGA, keyed by [`NodeId`] in the owning [`crate::crdt::Rga`].
///
/// `id` and `after_id` are immutable for the lifetime of the node; the only
/// mutation a node ever undergoes is the monotone `false -> true` transition
/// of `tombstoned`. Values are never mutated in place: a content change is
/// modeled as delete-then-insert by the caller (see the changeset applier).
#[derive(Debug, Clone)]
pub struct RgaNode<T, E: Event> {
    /// Unique identifier that determines this node's position in the causal tree.
    pub id: NodeId<E>,
    /// The value held by this node.
    pub value: T,
    /// The node this one was inserted after. `None` means "after the virtual root".
    pub after_id: Option<NodeId<E>>,
    /// Whether this node has been logically deleted (tombstone).
    pub tombstoned: bool,
}

impl<T, E: Event> RgaNode<T, E> {
    /// Creates a new, non-tombstoned node.
    pub fn new(id: NodeId<E>, value: T, after_id: Option<NodeId<E>>) -> Self {
        RgaNode {
            id,
            value,
            after_id,
            tombstoned: false,
        }
    }

    /// Marks this node as deleted. Idempotent: deleting an already-tombstoned
    /// node is a no-op.
    pub fn tombstone(&mut self) {
        self.tombstoned = true;
    }
}
