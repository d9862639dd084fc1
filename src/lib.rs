//! # md-crdt-rga
//!
//! Conflict-free collaborative editing of structured markdown documents.
//!
//! Every ordered child collection of a document's AST -- the blocks under
//! the root, the inline spans of a paragraph, the items of a list, and so
//! on -- is modeled as its own Replicated Growable Array (RGA): a
//! causal-tree sequence CRDT addressed by stable node identity rather than
//! position, so concurrent inserts, deletes, and edits at any depth
//! converge without coordination (see [`crdt`]).
//!
//! [`Document`] is the entry point most callers want: parse markdown in,
//! diff a locally-edited buffer back into a changeset, apply or merge
//! changesets, and render back out to markdown. The lower-level pieces
//! ([`ast`], [`tree`], [`changeset`], [`serialize`]) are public for callers
//! that need to operate below that API -- e.g. resolving a changeset
//! against a tree fetched from storage rather than held in memory.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use md_crdt_rga::{Document, crdt::{Event, EventCmpFn}};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
//! struct Replica(u32);
//!
//! impl Event for Replica {
//!     fn to_event_string(&self) -> String {
//!         self.0.to_string()
//!     }
//! }
//!
//! fn event_cmp() -> EventCmpFn<Replica> {
//!     Arc::new(|a: &Replica, b: &Replica| a.cmp(b))
//! }
//!
//! let doc = Document::from_markdown("# Hello\n\nWorld.", Replica(0), event_cmp());
//! let change_set = doc.diff("# Hello\n\nWorld, updated.", Replica(1));
//! let edited = doc.apply(&change_set);
//! assert_eq!(edited.to_markdown().trim_end(), "# Hello\n\nWorld, updated.");
//! ```

pub mod ast;
pub mod changeset;
pub mod crdt;
pub mod error;
pub mod serialize;
pub mod tree;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crdt::{Event, EventCmpFn};
use error::{DecodeError, EncodeError};
use tree::{RgaTreeNode, RgaTreeParent};

/// A markdown document under CRDT control: an RGA tree plus the event
/// comparator it was built with.
///
/// `Document` is cheap to clone structurally (every operation returns a new
/// value rather than mutating in place) which matches how the underlying
/// tree/changeset operations are written -- see [`changeset::apply_change_set`]
/// and [`tree::merge_trees`].
#[derive(Clone)]
pub struct Document<E: Event> {
    tree: RgaTreeParent<E>,
    event_cmp: EventCmpFn<E>,
}

impl<E: Event> Document<E> {
    /// Parses `markdown` and builds a fresh RGA tree from it, with every
    /// node stamped by `event` (a bootstrap import is a single causal
    /// event, applied to every node in document order).
    pub fn from_markdown(markdown: &str, event: E, event_cmp: EventCmpFn<E>) -> Self {
        let ast = ast::parse(markdown);
        let tree = match tree::to_rga_tree(&ast, event, Arc::clone(&event_cmp)) {
            RgaTreeNode::Parent(p) => p,
            RgaTreeNode::Leaf(_) => unreachable!("a parsed document root always has children"),
        };
        Document { tree, event_cmp }
    }

    /// Wraps an already-built tree (e.g. one produced by [`Self::apply`],
    /// [`Self::merge`], or [`serialize::decode_tree`]).
    pub fn from_tree(tree: RgaTreeParent<E>, event_cmp: EventCmpFn<E>) -> Self {
        Document { tree, event_cmp }
    }

    /// The underlying RGA tree, for callers operating below this API.
    pub fn tree(&self) -> &RgaTreeParent<E> {
        &self.tree
    }

    /// Renders the document's current visible content back to markdown.
    pub fn to_markdown(&self) -> String {
        ast::stringify(&tree::to_ast(&RgaTreeNode::Parent(self.tree.clone())))
    }

    /// Diffs this document's current rendering against `new_markdown` and
    /// resolves the result to an id-addressed [`changeset::ChangeSet`],
    /// stamped with `event`.
    pub fn diff(&self, new_markdown: &str, event: E) -> changeset::ChangeSet<E> {
        changeset::compute_change_set(&self.tree, new_markdown, event, Arc::clone(&self.event_cmp))
    }

    /// Applies a changeset, returning the resulting document. Changes whose
    /// path no longer resolves are silently dropped (see
    /// [`changeset::apply_change_set`]).
    pub fn apply(&self, change_set: &changeset::ChangeSet<E>) -> Document<E> {
        Document {
            tree: changeset::apply_change_set(&self.tree, change_set),
            event_cmp: Arc::clone(&self.event_cmp),
        }
    }

    /// State-based merge with another replica's document (§4.5). Merge is
    /// commutative, associative, and idempotent: see
    /// [`crdt::Rga::merge`] and [`tree::merge_trees`].
    pub fn merge(&self, other: &Document<E>) -> Document<E> {
        Document {
            tree: tree::merge_trees(&self.tree, &other.tree),
            event_cmp: Arc::clone(&self.event_cmp),
        }
    }

    /// Total nodes (live and tombstoned) across the whole tree. Descends
    /// recursively; cost is proportional to document size.
    pub fn total_node_count(&self) -> usize {
        fn count<E: Event>(node: &RgaTreeNode<E>) -> usize {
            match node {
                RgaTreeNode::Leaf(_) => 1,
                RgaTreeNode::Parent(p) => {
                    1 + p.children.to_all_nodes().iter().map(|n| count(&n.value)).sum::<usize>()
                }
            }
        }
        count(&RgaTreeNode::Parent(self.tree.clone()))
    }

    /// Encodes the document's tree to CBOR bytes (§10.1).
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError>
    where
        E: Serialize,
    {
        serialize::encode_tree(&self.tree)
    }

    /// Decodes a document previously produced by [`Self::encode`].
    pub fn decode(bytes: &[u8], event_cmp: EventCmpFn<E>) -> Result<Self, DecodeError>
    where
        E: DeserializeOwned,
    {
        let tree = serialize::decode_tree(bytes, Arc::clone(&event_cmp))?;
        Ok(Document { tree, event_cmp })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Replica(u32);

    impl Event for Replica {
        fn to_event_string(&self) -> String {
            self.0.to_string()
        }
    }

    fn cmp() -> EventCmpFn<Replica> {
        Arc::new(|a: &Replica, b: &Replica| a.cmp(b))
    }

    #[test]
    fn from_markdown_then_to_markdown_roundtrips() {
        let doc = Document::from_markdown("# Title\n\nBody text.", Replica(0), cmp());
        assert_eq!(doc.to_markdown().trim_end(), "# Title\n\nBody text.");
    }

    #[test]
    fn diff_then_apply_reaches_the_target() {
        let doc = Document::from_markdown("# Title\n\nOld.", Replica(0), cmp());
        let change_set = doc.diff("# Title\n\nNew.", Replica(1));
        let edited = doc.apply(&change_set);
        assert_eq!(edited.to_markdown().trim_end(), "# Title\n\nNew.");
    }

    #[test]
    fn independent_edits_converge_under_merge() {
        let base = Document::from_markdown("# Title\n\nBody.", Replica(0), cmp());

        let a_changes = base.diff("# Title\n\nBody.\n\nAppended by A.", Replica(1));
        let replica_a = base.apply(&a_changes);

        let b_changes = base.diff("# Renamed\n\nBody.", Replica(2));
        let replica_b = base.apply(&b_changes);

        let merged_ab = replica_a.merge(&replica_b);
        let merged_ba = replica_b.merge(&replica_a);
        assert_eq!(merged_ab.to_markdown(), merged_ba.to_markdown());

        let rendered = merged_ab.to_markdown();
        assert!(rendered.contains("Renamed"));
        assert!(rendered.contains("Appended by A."));
    }

    #[test]
    fn encode_decode_roundtrips_through_document() {
        let doc = Document::from_markdown("# Title\n\n- a\n- b", Replica(0), cmp());
        let bytes = doc.encode().unwrap();
        let decoded = Document::decode(&bytes, cmp()).unwrap();
        assert_eq!(doc.to_markdown(), decoded.to_markdown());
    }
}
