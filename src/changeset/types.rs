//! Changeset wire and resolution types (§4.3/§4.4).

use crate::ast::AstNode;
use crate::crdt::{Event, NodeId};
use crate::tree::RgaTreeNode;

/// An operation addressed purely by index, the output of [`super::diff::diff`].
/// `path` names the old-document indices of every matched ancestor parent
/// from the root down (empty for a root-level change); `index` is a
/// position within that parent's *old* visible sequence — for `Insert`,
/// "before the old item currently at this index" (or "at the end" when
/// `index` equals the old sequence length).
#[derive(Debug, Clone, PartialEq)]
pub struct IndexChange {
    pub path: Vec<usize>,
    pub op: IndexOp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndexOp {
    /// One or more consecutive new-side nodes to insert starting at `index`,
    /// in document order. Batched together (rather than one `IndexChange`
    /// per node) so the resolver/applier can chain them after one another
    /// instead of anchoring every node to the same predecessor, which would
    /// leave their relative order to the uuid tie-break.
    Insert { index: usize, nodes: Vec<AstNode> },
    Delete { index: usize },
}

/// An operation addressed by stable `NodeId`s, the output of
/// [`super::resolve::resolve_change_set`] and the input to
/// [`super::apply::apply_change_set`]. `path` names the ids of every
/// ancestor parent from the root down.
#[derive(Debug, Clone)]
pub struct RgaChange<E: Event> {
    pub path: Vec<NodeId<E>>,
    pub op: RgaChangeOp<E>,
}

#[derive(Debug, Clone)]
pub enum RgaChangeOp<E: Event> {
    /// `nodes`, in order, each chained after the previous one's freshly
    /// minted id (the first after `after`) -- never all anchored to the
    /// same predecessor -- so applying them reproduces document order
    /// regardless of the uuid tie-break.
    Insert {
        after: Option<NodeId<E>>,
        nodes: Vec<RgaTreeNode<E>>,
        event: E,
    },
    Delete {
        id: NodeId<E>,
    },
}

/// An ordered batch of id-addressed changes, ready to apply.
#[derive(Debug, Clone)]
pub struct ChangeSet<E: Event> {
    pub changes: Vec<RgaChange<E>>,
}

impl<E: Event> Default for ChangeSet<E> {
    fn default() -> Self {
        ChangeSet { changes: Vec::new() }
    }
}

impl<E: Event> ChangeSet<E> {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
