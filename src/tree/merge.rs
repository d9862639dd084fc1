//! State-based merge of two RGA trees (§4.5).
//!
//! `Rga::merge` already converges a single level: it unions nodes and ORs
//! tombstones for matching ids. But an `Rga`'s own node-level merge does not
//! look *inside* the values it stores — so when the same `NodeId` holds a
//! `Parent` on both sides, the two replicas' independent edits to that
//! parent's nested children would otherwise be lost (whichever side
//! `merge` happened to keep its value from wins outright). `merge_trees`
//! walks both sides' entries and recurses into every matched `Parent`,
//! so convergence holds at every depth, not just the top level.

use std::collections::HashMap;

use crate::crdt::{Event, NodeId};

use super::node::{RgaTreeNode, RgaTreeParent};

pub fn merge_trees<E: Event>(a: &RgaTreeParent<E>, b: &RgaTreeParent<E>) -> RgaTreeParent<E> {
    tracing::trace!(node_type = %a.node_type, "merging tree level");
    let mut result = a.clone();
    result.children.merge(&b.children);

    let b_parents: HashMap<NodeId<E>, &RgaTreeParent<E>> = b
        .children
        .all_entries()
        .filter_map(|(id, v)| match v {
            RgaTreeNode::Parent(p) => Some((id.clone(), p)),
            RgaTreeNode::Leaf(_) => None,
        })
        .collect();

    let a_entries: Vec<(&NodeId<E>, &RgaTreeNode<E>)> = a.children.all_entries().collect();
    for (id, value) in a_entries {
        let RgaTreeNode::Parent(a_parent) = value else { continue };
        let Some(b_parent) = b_parents.get(id) else { continue };
        let merged = merge_trees(a_parent, b_parent);
        if let Some(slot) = result.children.get_mut(id) {
            *slot = RgaTreeNode::Parent(merged);
        }
    }

    result
}
