//! CBOR encode/decode of trees and changesets, via the wire mirrors in
//! [`super::wire`].
//!
//! Decoding a tree or changeset always needs a fresh `EventCmpFn` from the
//! caller: a comparator closure can't cross the wire, so every decode call
//! takes one explicitly, the same way constructing an `Rga` does.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::crdt::{Event, EventCmpFn, NodeId, Rga, RgaNode};
use crate::error::{DecodeError, EncodeError};
use crate::tree::{RgaTreeNode, RgaTreeParent, tree_node_fingerprint};

use super::wire::{
    ChangeSetWire, NodeIdWire, RgaChangeOpWire, RgaChangeWire, RgaWire, TreeNodeWire, TreeParentWire,
};
use crate::changeset::{ChangeSet, RgaChange, RgaChangeOp};

fn node_id_to_wire<E: Event>(id: &NodeId<E>) -> NodeIdWire<E> {
    NodeIdWire {
        uuid: id.uuid,
        event: id.event.clone(),
    }
}

fn wire_to_node_id<E: Event>(w: NodeIdWire<E>) -> NodeId<E> {
    NodeId::new(w.uuid, w.event)
}

fn rga_to_wire<T, E, VW>(rga: &Rga<T, E>, value_to_wire: impl Fn(&T) -> VW) -> RgaWire<VW, E>
where
    T: Clone,
    E: Event,
{
    let nodes = rga
        .to_all_nodes()
        .into_iter()
        .map(|n| RgaNodeWireParts {
            id: node_id_to_wire(&n.id),
            value: value_to_wire(&n.value),
            after_id: n.after_id.as_ref().map(node_id_to_wire),
            tombstoned: n.tombstoned,
        })
        .map(Into::into)
        .collect();
    RgaWire { nodes }
}

/// Intermediate so the `rga_to_wire` closure doesn't need to name
/// `RgaNodeWire` generics explicitly at each call site.
struct RgaNodeWireParts<V, E> {
    id: NodeIdWire<E>,
    value: V,
    after_id: Option<NodeIdWire<E>>,
    tombstoned: bool,
}

impl<V, E> From<RgaNodeWireParts<V, E>> for super::wire::RgaNodeWire<V, E> {
    fn from(p: RgaNodeWireParts<V, E>) -> Self {
        super::wire::RgaNodeWire {
            id: p.id,
            value: p.value,
            after_id: p.after_id,
            tombstoned: p.tombstoned,
        }
    }
}

fn wire_to_rga<T, E, VW>(
    wire: RgaWire<VW, E>,
    fingerprint: crate::crdt::FingerprintFn<T>,
    event_cmp: EventCmpFn<E>,
    wire_to_value: impl Fn(VW) -> T,
) -> Rga<T, E>
where
    E: Event,
{
    let mut rga = Rga::new(fingerprint, event_cmp);
    for n in wire.nodes {
        let id = wire_to_node_id(n.id);
        let after_id = n.after_id.map(wire_to_node_id);
        let mut node = RgaNode::new(id, wire_to_value(n.value), after_id);
        if n.tombstoned {
            node.tombstone();
        }
        rga.insert_raw(node);
    }
    rga
}

fn tree_fingerprint_fn<E: Event>() -> crate::crdt::FingerprintFn<RgaTreeNode<E>> {
    Arc::new(|n: &RgaTreeNode<E>| tree_node_fingerprint(n))
}

fn tree_node_to_wire<E: Event>(node: &RgaTreeNode<E>) -> TreeNodeWire<E> {
    match node {
        RgaTreeNode::Leaf(ast) => TreeNodeWire::Leaf(ast.clone()),
        RgaTreeNode::Parent(p) => TreeNodeWire::Parent(parent_to_wire(p)),
    }
}

fn parent_to_wire<E: Event>(p: &RgaTreeParent<E>) -> TreeParentWire<E> {
    TreeParentWire {
        node_type: p.node_type.clone(),
        attributes: p.attributes.clone(),
        children: rga_to_wire(&p.children, tree_node_to_wire),
    }
}

fn wire_to_tree_node<E: Event>(w: TreeNodeWire<E>, event_cmp: &EventCmpFn<E>) -> RgaTreeNode<E> {
    match w {
        TreeNodeWire::Leaf(ast) => RgaTreeNode::Leaf(ast),
        TreeNodeWire::Parent(p) => RgaTreeNode::Parent(wire_to_parent(p, event_cmp)),
    }
}

fn wire_to_parent<E: Event>(w: TreeParentWire<E>, event_cmp: &EventCmpFn<E>) -> RgaTreeParent<E> {
    RgaTreeParent {
        node_type: w.node_type,
        attributes: w.attributes,
        children: wire_to_rga(w.children, tree_fingerprint_fn(), Arc::clone(event_cmp), |vw| {
            wire_to_tree_node(vw, event_cmp)
        }),
    }
}

/// Encodes a tree to DAG-CBOR-style bytes.
pub fn encode_tree<E>(root: &RgaTreeParent<E>) -> Result<Vec<u8>, EncodeError>
where
    E: Event + Serialize,
{
    let wire = parent_to_wire(root);
    let mut buf = Vec::new();
    ciborium::into_writer(&wire, &mut buf)?;
    Ok(buf)
}

/// Decodes a tree from bytes produced by [`encode_tree`]. `event_cmp` is
/// supplied fresh by the caller, since comparator closures never cross the
/// wire.
pub fn decode_tree<E>(bytes: &[u8], event_cmp: EventCmpFn<E>) -> Result<RgaTreeParent<E>, DecodeError>
where
    E: Event + DeserializeOwned,
{
    let wire: TreeParentWire<E> = ciborium::from_reader(bytes)?;
    Ok(wire_to_parent(wire, &event_cmp))
}

fn change_set_to_wire<E: Event>(cs: &ChangeSet<E>) -> ChangeSetWire<E> {
    ChangeSetWire {
        changes: cs
            .changes
            .iter()
            .map(|c| RgaChangeWire {
                path: c.path.iter().map(node_id_to_wire).collect(),
                op: match &c.op {
                    RgaChangeOp::Insert { after, nodes, event } => RgaChangeOpWire::Insert {
                        after: after.as_ref().map(node_id_to_wire),
                        nodes: nodes.iter().map(tree_node_to_wire).collect(),
                        event: event.clone(),
                    },
                    RgaChangeOp::Delete { id } => RgaChangeOpWire::Delete { id: node_id_to_wire(id) },
                },
            })
            .collect(),
    }
}

fn wire_to_change_set<E: Event>(w: ChangeSetWire<E>, event_cmp: &EventCmpFn<E>) -> ChangeSet<E> {
    ChangeSet {
        changes: w
            .changes
            .into_iter()
            .map(|c| RgaChange {
                path: c.path.into_iter().map(wire_to_node_id).collect(),
                op: match c.op {
                    RgaChangeOpWire::Insert { after, nodes, event } => RgaChangeOp::Insert {
                        after: after.map(wire_to_node_id),
                        nodes: nodes.into_iter().map(|n| wire_to_tree_node(n, event_cmp)).collect(),
                        event,
                    },
                    RgaChangeOpWire::Delete { id } => RgaChangeOp::Delete { id: wire_to_node_id(id) },
                },
            })
            .collect(),
    }
}

/// Encodes a changeset to DAG-CBOR-style bytes.
pub fn encode_change_set<E>(cs: &ChangeSet<E>) -> Result<Vec<u8>, EncodeError>
where
    E: Event + Serialize,
{
    let wire = change_set_to_wire(cs);
    let mut buf = Vec::new();
    ciborium::into_writer(&wire, &mut buf)?;
    Ok(buf)
}

/// Decodes a changeset from bytes produced by [`encode_change_set`].
pub fn decode_change_set<E>(bytes: &[u8], event_cmp: EventCmpFn<E>) -> Result<ChangeSet<E>, DecodeError>
where
    E: Event + DeserializeOwned,
{
    let wire: ChangeSetWire<E> = ciborium::from_reader(bytes)?;
    Ok(wire_to_change_set(wire, &event_cmp))
}
