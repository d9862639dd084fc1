//! Computing, resolving, and applying changesets (§4.3/§4.4): the path a
//! locally-edited markdown buffer takes back into the shared RGA tree.

mod apply;
mod diff;
mod resolve;
mod types;

pub use apply::apply_change_set;
pub use diff::diff;
pub use resolve::resolve_change_set;
pub use types::{ChangeSet, IndexChange, IndexOp, RgaChange, RgaChangeOp};

use crate::crdt::{Event, EventCmpFn};
use crate::tree::{RgaTreeNode, RgaTreeParent, to_ast};

/// Diffs the tree's current rendering against `new_markdown` and resolves
/// the result straight to an id-addressed [`ChangeSet`], ready to apply.
/// This is the common case: a caller typically never needs the
/// intermediate index-addressed form `diff` produces on its own.
pub fn compute_change_set<E: Event>(
    tree: &RgaTreeParent<E>,
    new_markdown: &str,
    event: E,
    event_cmp: EventCmpFn<E>,
) -> ChangeSet<E> {
    let old_ast = to_ast(&RgaTreeNode::Parent(tree.clone()));
    let new_ast = crate::ast::parse(new_markdown);

    let mut index_changes = Vec::new();
    diff::diff(&old_ast, &new_ast, &mut index_changes);
    resolve::resolve_change_set(tree, &index_changes, event, event_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::stringify;
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

    #[test]
    fn compute_then_apply_reaches_the_target_markdown() {
        let ast = crate::ast::parse("# Hello\n\nWorld.");
        let tree = match crate::tree::to_rga_tree(&ast, Seq(0), cmp()) {
            RgaTreeNode::Parent(p) => p,
            RgaTreeNode::Leaf(_) => unreachable!(),
        };

        let target = "# Hello\n\nWorld, updated.";
        let change_set = compute_change_set(&tree, target, Seq(1), cmp());
        let applied = apply_change_set(&tree, &change_set);
        let rendered = stringify(&to_ast(&RgaTreeNode::Parent(applied)));
        assert_eq!(rendered.trim_end(), target);
    }
}
