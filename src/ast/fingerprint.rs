//! Content fingerprinting used by the changeset diff (§4.3).
//!
//! A leaf's fingerprint is its full rendered text: any change to a leaf is a
//! full replacement. A parent's fingerprint covers only its `type` and
//! attributes, deliberately excluding its children, so that a parent whose
//! children changed but whose shape didn't still matches in the diff and
//! gets recursed into rather than replaced wholesale.

use std::collections::BTreeMap;

use serde_json::Value;

use super::node::AstNode;
use super::stringify::stringify;

pub fn fingerprint(node: &AstNode) -> String {
    match node.children() {
        Some(_) => parent_fingerprint(node.node_type(), &node.attributes()),
        None => stringify(node),
    }
}

/// Builds the same fingerprint [`fingerprint`] would for a parent, from its
/// `node_type` and `attributes` directly. Used by the RGA-tree walk, which
/// has already split a node into its type/attributes/children.
///
/// `attributes` must be a `BTreeMap` (sorted keys) so the result is stable
/// regardless of the order attributes were inserted.
pub fn parent_fingerprint(node_type: &str, attributes: &BTreeMap<String, Value>) -> String {
    let mut out = format!("{{\"type\":\"{node_type}\"");
    for (k, v) in attributes {
        out.push_str(&format!(",\"{k}\":{v}"));
    }
    out.push('}');
    out
}
