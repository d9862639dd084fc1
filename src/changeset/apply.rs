//! Applies a resolved [`ChangeSet`] to an RGA tree (§4.4).
//!
//! The result is always a fresh clone mutated in place, never the original:
//! callers that need the pre-change tree (e.g. to diff two edits against a
//! common ancestor) keep their own reference. A change whose `path` no
//! longer resolves against this particular tree is skipped, the same
//! tolerance [`super::resolve::resolve_change_set`] applies to stale paths.

use crate::crdt::Event;
use crate::tree::{RgaTreeNode, RgaTreeParent};

use super::types::{ChangeSet, RgaChangeOp};

pub fn apply_change_set<E: Event>(root: &RgaTreeParent<E>, change_set: &ChangeSet<E>) -> RgaTreeParent<E> {
    let mut result = root.clone();
    for change in &change_set.changes {
        let mut current = &mut result;
        let mut ok = true;
        for id in &change.path {
            match current.children.get_mut(id) {
                Some(RgaTreeNode::Parent(p)) => current = p,
                _ => {
                    ok = false;
                    break;
                }
            }
        }
        if !ok {
            tracing::debug!(path_len = change.path.len(), "dropping change, path no longer resolves");
            continue;
        }
        match &change.op {
            RgaChangeOp::Insert { after, nodes, event } => {
                let mut anchor = after.clone();
                for node in nodes {
                    let id = current.children.insert(anchor, node.clone(), event.clone());
                    anchor = Some(id);
                }
            }
            RgaChangeOp::Delete { id } => current.children.delete(id),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{parse, stringify};
    use crate::changeset::diff::diff;
    use crate::changeset::resolve::resolve_change_set;
    use crate::crdt::EventCmpFn;
    use crate::tree::{to_ast, to_rga_tree};
    use std::sync::Arc;

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

    fn edit(old_md: &str, new_md: &str) -> String {
        let old_ast = parse(old_md);
        let tree = as_parent(to_rga_tree(&old_ast, Seq(0), cmp()));
        let new_ast = parse(new_md);

        let mut index_changes = Vec::new();
        diff(&old_ast, &new_ast, &mut index_changes);
        let change_set = resolve_change_set(&tree, &index_changes, Seq(1), cmp());
        let applied = apply_change_set(&tree, &change_set);
        stringify(&to_ast(&RgaTreeNode::Parent(applied)))
    }

    #[test]
    fn apply_inserts_a_code_block() {
        let out = edit(
            "```\nfirst\n```\n\n```\nthird\n```",
            "```\nfirst\n```\n\n```\nsecond\n```\n\n```\nthird\n```",
        );
        assert_eq!(out.trim_end(), "```\nfirst\n```\n\n```\nsecond\n```\n\n```\nthird\n```");
    }

    #[test]
    fn apply_deletes_a_code_block() {
        let out = edit(
            "```\nfirst\n```\n\n```\nsecond\n```\n\n```\nthird\n```",
            "```\nfirst\n```\n\n```\nthird\n```",
        );
        assert_eq!(out.trim_end(), "```\nfirst\n```\n\n```\nthird\n```");
    }

    #[test]
    fn apply_edits_nested_text() {
        let out = edit("# Title\n\nOld text.", "# Title\n\nNew text.");
        assert_eq!(out.trim_end(), "# Title\n\nNew text.");
    }

    #[test]
    fn stale_change_set_is_a_no_op_not_a_panic() {
        let old_ast = parse("A");
        let tree = as_parent(to_rga_tree(&old_ast, Seq(0), cmp()));
        let bogus = super::super::types::IndexChange {
            path: vec![99],
            op: super::super::types::IndexOp::Delete { index: 0 },
        };
        let change_set = resolve_change_set(&tree, std::slice::from_ref(&bogus), Seq(1), cmp());
        let applied = apply_change_set(&tree, &change_set);
        assert_eq!(stringify(&to_ast(&RgaTreeNode::Parent(applied))).trim_end(), "A");
    }
}
