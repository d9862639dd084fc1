//! Wire-format mirrors of the in-memory CRDT types.
//!
//! These exist only at the encode/decode boundary. Unlike the live types,
//! they carry no closures (a fingerprint function and an event comparator
//! can't cross the wire) and no implicit traversal order: `RgaWire` is a
//! flat bag of nodes, rebuilt into a real `Rga` (with its traversal order
//! recomputed from `after_id`) on decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::ast::AstNode;

#[derive(Debug, Serialize, Deserialize)]
pub struct NodeIdWire<E> {
    pub uuid: Uuid,
    pub event: E,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RgaNodeWire<V, E> {
    pub id: NodeIdWire<E>,
    pub value: V,
    pub after_id: Option<NodeIdWire<E>>,
    pub tombstoned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RgaWire<V, E> {
    pub nodes: Vec<RgaNodeWire<V, E>>,
}

/// Mirrors `RgaTreeNode<E>`: either an un-decomposed leaf, or a parent with
/// its own nested, still-wire-form child sequence.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNodeWire<E> {
    Leaf(AstNode),
    Parent(TreeParentWire<E>),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TreeParentWire<E> {
    pub node_type: String,
    pub attributes: BTreeMap<String, Value>,
    pub children: RgaWire<TreeNodeWire<E>, E>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeSetWire<E> {
    pub changes: Vec<RgaChangeWire<E>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RgaChangeWire<E> {
    pub path: Vec<NodeIdWire<E>>,
    pub op: RgaChangeOpWire<E>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum RgaChangeOpWire<E> {
    Insert {
        after: Option<NodeIdWire<E>>,
        nodes: Vec<TreeNodeWire<E>>,
        event: E,
    },
    Delete {
        id: NodeIdWire<E>,
    },
}
