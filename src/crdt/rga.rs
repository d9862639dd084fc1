//! Core RGA CRDT implementation.
//!
//! This module contains the main [`Rga`] struct: a causal-tree sequence CRDT
//! addressed by [`NodeId`] rather than by position, so concurrent inserts and
//! deletes converge without coordination.
//!
//! # Design
//!
//! - Every node records the id it was inserted after (`after_id`); there is
//!   no separate head/tail pointer, so the visible order is recomputed from
//!   that `after_id` graph on every read (see [`Rga::traversal_order`]).
//! - A single `HashMap<NodeId<E>, RgaNode<T, E>>` holds every node the
//!   replica has ever seen, live or tombstoned; nothing is ever removed.
//! - The event comparator and fingerprint function are supplied once at
//!   construction and stored as shared closures, so every later operation is
//!   a pure function of the node set.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::crdt::node::RgaNode;
use crate::crdt::types::{Event, NodeId};

/// A pure fingerprint function, `T -> String`. Only used by the changeset
/// resolver (see `crate::changeset`), never by the CRDT's own ordering.
pub type FingerprintFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// A pure event comparator, the primary sibling tie-break in traversal.
pub type EventCmpFn<E> = Arc<dyn Fn(&E, &E) -> Ordering + Send + Sync>;

/// The Replicated Growable Array (RGA) CRDT.
///
/// `T` is the element type (a leaf value, or a nested [`crate::tree::RgaTreeNode`]);
/// `E` is the caller's opaque event type. Construction always supplies a
/// fingerprint function and an event comparator; both are retained for the
/// lifetime of the `Rga` so that `from_array`/resolver code can call back
/// into them without threading extra arguments through every method.
pub struct Rga<T, E: Event> {
    nodes: HashMap<NodeId<E>, RgaNode<T, E>>,
    fingerprint: FingerprintFn<T>,
    event_cmp: EventCmpFn<E>,
}

impl<T: fmt::Debug, E: Event> fmt::Debug for Rga<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rga").field("nodes", &self.nodes).finish()
    }
}

impl<T: Clone, E: Event> Clone for Rga<T, E> {
    fn clone(&self) -> Self {
        Rga {
            nodes: self.nodes.clone(),
            fingerprint: Arc::clone(&self.fingerprint),
            event_cmp: Arc::clone(&self.event_cmp),
        }
    }
}

impl<T, E: Event> Rga<T, E> {
    /// Creates a new, empty RGA with the given fingerprint and event comparator.
    pub fn new(fingerprint: FingerprintFn<T>, event_cmp: EventCmpFn<E>) -> Self {
        Rga {
            nodes: HashMap::new(),
            fingerprint,
            event_cmp,
        }
    }

    /// The fingerprint function this RGA was constructed with.
    pub fn fingerprint_fn(&self) -> FingerprintFn<T> {
        Arc::clone(&self.fingerprint)
    }

    /// The event comparator this RGA was constructed with.
    pub fn event_cmp_fn(&self) -> EventCmpFn<E> {
        Arc::clone(&self.event_cmp)
    }

    /// Inserts `value` after `after`, minting a fresh [`NodeId`] from a new
    /// random uuid and the given `event`. Returns the new id.
    pub fn insert(&mut self, after: Option<NodeId<E>>, value: T, event: E) -> NodeId<E> {
        let id = NodeId::new(Uuid::new_v4(), event);
        self.nodes
            .insert(id.clone(), RgaNode::new(id.clone(), value, after));
        id
    }

    /// Inserts an already-built node as-is, preserving its id, `after_id`,
    /// and tombstone state. Used only by the wire decoder, which is
    /// reconstructing nodes whose identity was minted by another replica
    /// and must not be re-minted.
    pub fn insert_raw(&mut self, node: RgaNode<T, E>) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Logically deletes the node named by `id`. A missing id is a no-op:
    /// this makes delete safe to replay.
    pub fn delete(&mut self, id: &NodeId<E>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.tombstone();
        }
    }

    /// Looks up a node's value by id, live or tombstoned.
    pub fn get(&self, id: &NodeId<E>) -> Option<&T> {
        self.nodes.get(id).map(|n| &n.value)
    }

    /// Mutable node lookup, used by the changeset applier to descend through
    /// nested parents by id rather than by index.
    pub fn get_mut(&mut self, id: &NodeId<E>) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|n| &mut n.value)
    }

    /// Total number of nodes held, including tombstones.
    pub fn total_node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live (non-tombstoned) nodes.
    pub fn visible_node_count(&self) -> usize {
        self.nodes.values().filter(|n| !n.tombstoned).count()
    }

    /// Merges in every node of `other`: nodes absent locally are copied in;
    /// nodes present in both have their tombstone flags OR'd together.
    /// Values and `after_id`s are never overwritten, since they are
    /// immutable per id by construction.
    pub fn merge(&mut self, other: &Rga<T, E>)
    where
        T: Clone,
    {
        for (id, node) in other.nodes.iter() {
            match self.nodes.get_mut(id) {
                Some(existing) => {
                    if node.tombstoned {
                        existing.tombstoned = true;
                    }
                }
                None => {
                    self.nodes.insert(id.clone(), node.clone());
                }
            }
        }
    }

    /// The deterministic pre-order traversal of every node (live or
    /// tombstoned), the heart of convergence. See the module docs and
    /// `SPEC_FULL.md` §4.1 for the algorithm.
    fn traversal_order(&self) -> Vec<NodeId<E>> {
        let mut children: HashMap<Option<NodeId<E>>, Vec<NodeId<E>>> = HashMap::new();
        for id in self.nodes.keys() {
            let node = &self.nodes[id];
            children
                .entry(node.after_id.clone())
                .or_default()
                .push(id.clone());
        }

        // A node inserted "after X" must land immediately after X, ahead of
        // whatever X's successors already were -- so siblings sharing an
        // `after_id` sort newest-event-first, not oldest-first.
        for siblings in children.values_mut() {
            siblings.sort_by(|a, b| {
                (self.event_cmp)(&b.event, &a.event).then_with(|| a.uuid.cmp(&b.uuid))
            });
        }

        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId<E>> = children
            .get(&None)
            .map(|roots| roots.iter().rev().cloned().collect())
            .unwrap_or_default();

        // An explicit stack (rather than recursion) keeps traversal depth
        // independent of Rust's call stack, since a deeply nested list is a
        // realistic document shape.
        while let Some(id) = stack.pop() {
            if let Some(kids) = children.get(&Some(id.clone())) {
                for kid in kids.iter().rev() {
                    stack.push(kid.clone());
                }
            }
            out.push(id);
        }

        out
    }

    /// The visible sequence: non-tombstoned values, in traversal order.
    pub fn to_array(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.traversal_order()
            .into_iter()
            .filter_map(|id| {
                let node = &self.nodes[&id];
                (!node.tombstoned).then(|| node.value.clone())
            })
            .collect()
    }

    /// Visible nodes, in traversal order.
    pub fn to_nodes(&self) -> Vec<RgaNode<T, E>>
    where
        T: Clone,
    {
        self.traversal_order()
            .into_iter()
            .filter_map(|id| {
                let node = self.nodes[&id].clone();
                (!node.tombstoned).then_some(node)
            })
            .collect()
    }

    /// Every node, live or tombstoned, in traversal order.
    pub fn to_all_nodes(&self) -> Vec<RgaNode<T, E>>
    where
        T: Clone,
    {
        self.traversal_order()
            .into_iter()
            .map(|id| self.nodes[&id].clone())
            .collect()
    }

    /// All nodes, live or tombstoned, as (id, value) pairs. Used by tree
    /// merge (`crate::tree::merge_trees`), which needs to look up matching
    /// parents regardless of tombstone state.
    pub fn all_entries(&self) -> impl Iterator<Item = (&NodeId<E>, &T)> {
        self.nodes.iter().map(|(id, n)| (id, &n.value))
    }

    /// The id at position `i` of the visible sequence.
    pub fn id_at_index(&self, i: usize) -> Option<NodeId<E>> {
        self.traversal_order()
            .into_iter()
            .filter(|id| !self.nodes[id].tombstoned)
            .nth(i)
    }

    /// The id at position `i - 1` of the visible sequence, or `None` if
    /// `i == 0` (meaning "insert at the head, after the virtual root").
    pub fn predecessor_for_index(&self, i: usize) -> Option<NodeId<E>> {
        if i == 0 {
            None
        } else {
            self.id_at_index(i - 1)
        }
    }

    /// Builds an RGA by inserting `items` sequentially, each after the
    /// previous, all under the same `event`.
    pub fn from_array(
        items: Vec<T>,
        event: E,
        fingerprint: FingerprintFn<T>,
        event_cmp: EventCmpFn<E>,
    ) -> Self {
        let mut rga = Rga::new(fingerprint, event_cmp);
        let mut after = None;
        for item in items {
            after = Some(rga.insert(after, item, event.clone()));
        }
        rga
    }
}
