//! Builds an RGA tree from an AST, and projects one back (§4.2).

use std::sync::Arc;

use crate::ast::AstNode;
use crate::crdt::{Event, EventCmpFn, FingerprintFn, Rga};

use super::node::{RgaTreeNode, RgaTreeParent, tree_node_fingerprint};

fn fingerprint_fn<E: Event>() -> FingerprintFn<RgaTreeNode<E>> {
    Arc::new(|n: &RgaTreeNode<E>| tree_node_fingerprint(n))
}

/// Recursively substitutes every ordered child collection of `ast` with an
/// `Rga`, stamping every node minted along the way with `event`. A fresh
/// document import is a single bootstrap event: every node in the resulting
/// tree is causally "inserted by" the same event, in document order.
pub fn to_rga_tree<E: Event>(ast: &AstNode, event: E, event_cmp: EventCmpFn<E>) -> RgaTreeNode<E> {
    match ast.children() {
        None => RgaTreeNode::Leaf(ast.clone()),
        Some(children) => {
            let mut rga = Rga::new(fingerprint_fn(), Arc::clone(&event_cmp));
            let mut after = None;
            for child in children {
                let node = to_rga_tree(child, event.clone(), Arc::clone(&event_cmp));
                after = Some(rga.insert(after, node, event.clone()));
            }
            RgaTreeNode::Parent(RgaTreeParent {
                node_type: ast.node_type().to_string(),
                attributes: ast.attributes(),
                children: rga,
            })
        }
    }
}

/// The inverse of [`to_rga_tree`]: flattens the RGA tree's visible sequence
/// back into a plain `AstNode`, dropping tombstones.
pub fn to_ast<E: Event>(node: &RgaTreeNode<E>) -> AstNode {
    match node {
        RgaTreeNode::Leaf(ast) => ast.clone(),
        RgaTreeNode::Parent(p) => {
            let children: Vec<AstNode> = p.children.to_array().iter().map(to_ast).collect();
            AstNode::from_parts(&p.node_type, &p.attributes, children)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;

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
    fn round_trips_through_rga_tree() {
        let ast = parse("# Title\n\nSome *text* here.\n\n- a\n- b");
        let tree = to_rga_tree(&ast, Seq(0), cmp());
        let back = to_ast(&tree);
        assert_eq!(ast, back);
    }

    #[test]
    fn parent_children_are_insertion_ordered() {
        let ast = parse("one\n\ntwo\n\nthree");
        let tree = to_rga_tree(&ast, Seq(0), cmp());
        if let RgaTreeNode::Parent(root) = &tree {
            assert_eq!(root.children.visible_node_count(), 3);
        } else {
            panic!("root must be a parent");
        }
    }
}
