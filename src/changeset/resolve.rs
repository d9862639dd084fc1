//! Resolves index-addressed changes against the live RGA tree into
//! id-addressed [`RgaChange`]s (§4.4).
//!
//! [`super::diff::diff`] runs on plain `AstNode`s and has no notion of
//! `NodeId`; this module walks the actual tree along each change's `path`
//! (interpreting every path segment as a position in that level's *visible*
//! sequence, exactly matching how the diff derived it from
//! [`crate::tree::to_ast`]) to recover the real ids an applier can act on.
//! A path or index that no longer resolves (the tree moved on since the
//! diff was computed) makes that one change a silent no-op rather than a
//! hard failure -- changesets are allowed to go stale.

use std::sync::Arc;

use crate::crdt::{Event, EventCmpFn};
use crate::tree::{RgaTreeNode, RgaTreeParent, to_rga_tree};

use super::types::{ChangeSet, IndexChange, IndexOp, RgaChange, RgaChangeOp};

pub fn resolve_change_set<E: Event>(
    root: &RgaTreeParent<E>,
    index_changes: &[IndexChange],
    event: E,
    event_cmp: EventCmpFn<E>,
) -> ChangeSet<E> {
    let mut changes = Vec::new();
    for ic in index_changes {
        match resolve_one(root, ic, &event, &event_cmp) {
            Some(change) => changes.push(change),
            None => tracing::debug!(path = ?ic.path, "index path did not resolve against the live tree"),
        }
    }
    ChangeSet { changes }
}

fn resolve_one<E: Event>(
    root: &RgaTreeParent<E>,
    ic: &IndexChange,
    event: &E,
    event_cmp: &EventCmpFn<E>,
) -> Option<RgaChange<E>> {
    let mut current = root;
    let mut path = Vec::new();
    for &idx in &ic.path {
        let id = current.children.id_at_index(idx)?;
        let value = current.children.get(&id)?;
        let RgaTreeNode::Parent(p) = value else { return None };
        path.push(id);
        current = p;
    }

    let op = match &ic.op {
        IndexOp::Delete { index } => RgaChangeOp::Delete {
            id: current.children.id_at_index(*index)?,
        },
        IndexOp::Insert { index, nodes } => {
            let after = current.children.predecessor_for_index(*index);
            let tree_nodes = nodes
                .iter()
                .map(|node| to_rga_tree(node, event.clone(), Arc::clone(event_cmp)))
                .collect();
            RgaChangeOp::Insert {
                after,
                nodes: tree_nodes,
                event: event.clone(),
            }
        }
    };

    Some(RgaChange { path, op })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;
    use crate::changeset::diff::diff;
    use crate::tree::to_rga_tree as build_tree;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Seq(u32);

    impl Event for Seq {
        fn to_event_string(&self) -> String {
            self.0.to_string()
        }
    }

    fn cmp() -> EventCmpFn<Seq> {
        Arc::new(|a: &Seq, b: &Seq| a.0.cmp(&b.0))
    }

    fn as_parent(node: RgaTreeNode<Seq>) -> RgaTreeParent<Seq> {
        match node {
            RgaTreeNode::Parent(p) => p,
            RgaTreeNode::Leaf(_) => panic!("root must be a parent"),
        }
    }

    #[test]
    fn resolves_a_top_level_delete_to_the_right_id() {
        let old_ast = parse("```\nfirst\n```\n\n```\nsecond\n```");
        let tree = as_parent(build_tree(&old_ast, Seq(0), cmp()));
        let new_ast = parse("```\nfirst\n```");

        let mut index_changes = Vec::new();
        diff(&old_ast, &new_ast, &mut index_changes);

        let expected_id = tree.children.id_at_index(1).unwrap();
        let change_set = resolve_change_set(&tree, &index_changes, Seq(1), cmp());
        assert_eq!(change_set.changes.len(), 1);
        match &change_set.changes[0].op {
            RgaChangeOp::Delete { id } => assert_eq!(*id, expected_id),
            RgaChangeOp::Insert { .. } => panic!("expected a delete"),
        }
    }

    #[test]
    fn stale_path_resolves_to_nothing() {
        let old_ast = parse("```\nfirst\n```");
        let tree = as_parent(build_tree(&old_ast, Seq(0), cmp()));
        let bogus = IndexChange {
            path: vec![99],
            op: IndexOp::Delete { index: 0 },
        };
        let change_set = resolve_change_set(&tree, std::slice::from_ref(&bogus), Seq(1), cmp());
        assert!(change_set.is_empty());
    }
}
