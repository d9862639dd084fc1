//! The RGA-tree shape (§4.2): every ordered child collection of the AST
//! becomes its own [`Rga`], recursively.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::ast::AstNode;
use crate::crdt::{Event, Rga};

/// One element of a parent's `children` RGA: either an un-decomposed leaf
/// AST node, or another ordered collection.
#[derive(Debug, Clone)]
pub enum RgaTreeNode<E: Event> {
    Leaf(AstNode),
    Parent(RgaTreeParent<E>),
}

/// A node with an ordered child collection, projected into the RGA world.
/// `node_type` and `attributes` mirror [`AstNode::node_type`] and
/// [`AstNode::attributes`] for the node this was built from; `children` is
/// the RGA sequence CRDT over its (recursively converted) children.
#[derive(Debug, Clone)]
pub struct RgaTreeParent<E: Event> {
    pub node_type: String,
    pub attributes: BTreeMap<String, Value>,
    pub children: Rga<RgaTreeNode<E>, E>,
}

/// The fingerprint function used for every `Rga<RgaTreeNode<E>, E>` in the
/// tree: a leaf fingerprints as its full text, a parent as its type and
/// attributes only (§4.2/§4.3), matching [`crate::ast::fingerprint`] exactly
/// so the diff resolver can compare AST children against tree children.
pub fn tree_node_fingerprint<E: Event>(node: &RgaTreeNode<E>) -> String {
    match node {
        RgaTreeNode::Leaf(ast) => crate::ast::fingerprint(ast),
        RgaTreeNode::Parent(p) => crate::ast::parent_fingerprint(&p.node_type, &p.attributes),
    }
}
