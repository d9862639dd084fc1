//! The document AST this crate operates on.
//!
//! `AstNode` stands in for the opaque, externally-parsed mdast tree the spec
//! describes: a real deployment would get this shape from a markdown
//! library and only need the three functions in [`crate::ast`] (`parse`,
//! `stringify`, `fingerprint`) at the boundary. This module provides a
//! small, self-contained CommonMark subset so the rest of the crate has a
//! concrete, round-trippable AST to build the RGA tree over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One node of the document tree. Parent variants (`Root`, `Heading`,
/// `Paragraph`, `Blockquote`, `List`, `ListItem`, `Emphasis`, `Strong`,
/// `Link`) carry an ordered `children` list; every other variant is a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AstNode {
    Root {
        children: Vec<AstNode>,
    },
    Heading {
        depth: u8,
        children: Vec<AstNode>,
    },
    Paragraph {
        children: Vec<AstNode>,
    },
    Blockquote {
        children: Vec<AstNode>,
    },
    List {
        ordered: bool,
        start: Option<u32>,
        children: Vec<AstNode>,
    },
    ListItem {
        children: Vec<AstNode>,
    },
    ThematicBreak,
    Code {
        lang: Option<String>,
        value: String,
    },
    Text {
        value: String,
    },
    Emphasis {
        children: Vec<AstNode>,
    },
    Strong {
        children: Vec<AstNode>,
    },
    InlineCode {
        value: String,
    },
    Link {
        url: String,
        title: Option<String>,
        children: Vec<AstNode>,
    },
    Image {
        url: String,
        alt: String,
        title: Option<String>,
    },
}

impl AstNode {
    /// The mdast-style type tag, also used as the RGA-tree parent's `node_type`.
    pub fn node_type(&self) -> &'static str {
        match self {
            AstNode::Root { .. } => "root",
            AstNode::Heading { .. } => "heading",
            AstNode::Paragraph { .. } => "paragraph",
            AstNode::Blockquote { .. } => "blockquote",
            AstNode::List { .. } => "list",
            AstNode::ListItem { .. } => "listItem",
            AstNode::ThematicBreak => "thematicBreak",
            AstNode::Code { .. } => "code",
            AstNode::Text { .. } => "text",
            AstNode::Emphasis { .. } => "emphasis",
            AstNode::Strong { .. } => "strong",
            AstNode::InlineCode { .. } => "inlineCode",
            AstNode::Link { .. } => "link",
            AstNode::Image { .. } => "image",
        }
    }

    /// `Some(children)` for every node with an ordered child collection,
    /// `None` for leaves. This is exactly the test the RGA-tree builder uses
    /// to decide Leaf vs. Parent (§4.2).
    pub fn children(&self) -> Option<&[AstNode]> {
        match self {
            AstNode::Root { children }
            | AstNode::Heading { children, .. }
            | AstNode::Paragraph { children }
            | AstNode::Blockquote { children }
            | AstNode::List { children, .. }
            | AstNode::ListItem { children }
            | AstNode::Emphasis { children }
            | AstNode::Strong { children }
            | AstNode::Link { children, .. } => Some(children),
            AstNode::ThematicBreak
            | AstNode::Code { .. }
            | AstNode::Text { .. }
            | AstNode::InlineCode { .. }
            | AstNode::Image { .. } => None,
        }
    }

    /// Consumes the node, returning its children (empty for a leaf).
    pub fn into_children(self) -> Vec<AstNode> {
        match self {
            AstNode::Root { children }
            | AstNode::Heading { children, .. }
            | AstNode::Paragraph { children }
            | AstNode::Blockquote { children }
            | AstNode::List { children, .. }
            | AstNode::ListItem { children }
            | AstNode::Emphasis { children }
            | AstNode::Strong { children }
            | AstNode::Link { children, .. } => children,
            AstNode::ThematicBreak
            | AstNode::Code { .. }
            | AstNode::Text { .. }
            | AstNode::InlineCode { .. }
            | AstNode::Image { .. } => Vec::new(),
        }
    }

    /// Every property of this node other than `type` and `children`, as a
    /// sorted map. This is exactly what an RGA-tree parent's `attributes`
    /// field stores, and what the parent fingerprint (§4.2) is built from.
    pub fn attributes(&self) -> BTreeMap<String, Value> {
        let mut m = BTreeMap::new();
        match self {
            AstNode::Heading { depth, .. } => {
                m.insert("depth".to_string(), json!(depth));
            }
            AstNode::List { ordered, start, .. } => {
                m.insert("ordered".to_string(), json!(ordered));
                m.insert("start".to_string(), json!(start));
            }
            AstNode::Code { lang, value } => {
                m.insert("lang".to_string(), json!(lang));
                m.insert("value".to_string(), json!(value));
            }
            AstNode::Text { value } | AstNode::InlineCode { value } => {
                m.insert("value".to_string(), json!(value));
            }
            AstNode::Link { url, title, .. } => {
                m.insert("url".to_string(), json!(url));
                m.insert("title".to_string(), json!(title));
            }
            AstNode::Image { url, alt, title } => {
                m.insert("url".to_string(), json!(url));
                m.insert("alt".to_string(), json!(alt));
                m.insert("title".to_string(), json!(title));
            }
            AstNode::Root { .. }
            | AstNode::Paragraph { .. }
            | AstNode::Blockquote { .. }
            | AstNode::ListItem { .. }
            | AstNode::ThematicBreak
            | AstNode::Emphasis { .. }
            | AstNode::Strong { .. } => {}
        }
        m
    }

    /// Rebuilds a node from a `node_type` tag, an attribute map (as produced
    /// by [`AstNode::attributes`]), and a children list. Used by the tree
    /// builder's reverse projection (`to_ast`) to turn a `(type, attrs)`
    /// RGA-tree parent back into a concrete `AstNode`.
    pub fn from_parts(node_type: &str, attributes: &BTreeMap<String, Value>, children: Vec<AstNode>) -> AstNode {
        let get_str = |key: &str| -> String {
            attributes
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let get_opt_str = |key: &str| -> Option<String> {
            attributes.get(key).and_then(Value::as_str).map(str::to_string)
        };
        match node_type {
            "root" => AstNode::Root { children },
            "heading" => AstNode::Heading {
                depth: attributes
                    .get("depth")
                    .and_then(Value::as_u64)
                    .unwrap_or(1) as u8,
                children,
            },
            "paragraph" => AstNode::Paragraph { children },
            "blockquote" => AstNode::Blockquote { children },
            "list" => AstNode::List {
                ordered: attributes
                    .get("ordered")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                start: attributes.get("start").and_then(Value::as_u64).map(|n| n as u32),
                children,
            },
            "listItem" => AstNode::ListItem { children },
            "code" => AstNode::Code {
                lang: get_opt_str("lang"),
                value: get_str("value"),
            },
            "text" => AstNode::Text { value: get_str("value") },
            "emphasis" => AstNode::Emphasis { children },
            "strong" => AstNode::Strong { children },
            "inlineCode" => AstNode::InlineCode { value: get_str("value") },
            "link" => AstNode::Link {
                url: get_str("url"),
                title: get_opt_str("title"),
                children,
            },
            "image" => AstNode::Image {
                url: get_str("url"),
                alt: get_str("alt"),
                title: get_opt_str("title"),
            },
            _ => AstNode::ThematicBreak,
        }
    }
}
