//! The document-AST adapter (§4.2 of `SPEC_FULL.md`).
//!
//! This is the one boundary the spec describes only by interface: a real
//! integration would plug in an existing markdown library here. `node`,
//! `parse`, and `stringify` provide a small, self-contained CommonMark
//! subset so the rest of the crate (tree builder, diff, applier) has a
//! concrete AST to work against; `fingerprint` is the content hash the
//! diff resolver keys on.

mod fingerprint;
mod node;
mod parse;
mod stringify;

pub use fingerprint::{fingerprint, parent_fingerprint};
pub use node::AstNode;
pub use parse::parse;
pub use stringify::stringify;

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrips(src: &str) {
        let ast = parse(src);
        let out = stringify(&ast);
        assert_eq!(out.trim_end(), src.trim_end(), "roundtrip mismatch for {src:?}");
    }

    #[test]
    fn roundtrips_heading_and_paragraph() {
        roundtrips("# Title\n\nSome text here.");
    }

    #[test]
    fn roundtrips_inline_markup() {
        roundtrips("a *b* c **d** e `f` g [text](https://example.com) h");
    }

    #[test]
    fn roundtrips_unordered_list() {
        roundtrips("- one\n- two\n- three");
    }

    #[test]
    fn roundtrips_ordered_list() {
        roundtrips("1. one\n2. two\n3. three");
    }

    #[test]
    fn roundtrips_blockquote() {
        roundtrips("> quoted text");
    }

    #[test]
    fn roundtrips_code_block() {
        roundtrips("```rust\nfn main() {}\n```");
    }

    #[test]
    fn roundtrips_thematic_break() {
        roundtrips("above\n\n---\n\nbelow");
    }

    #[test]
    fn parses_multiple_top_level_blocks_in_order() {
        let ast = parse("# H\n\nP1\n\nP2");
        let children = ast.into_children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].node_type(), "heading");
        assert_eq!(children[1].node_type(), "paragraph");
        assert_eq!(children[2].node_type(), "paragraph");
    }

    #[test]
    fn attributes_and_from_parts_roundtrip_a_heading() {
        let h = AstNode::Heading {
            depth: 3,
            children: vec![AstNode::Text { value: "x".into() }],
        };
        let attrs = h.attributes();
        let rebuilt = AstNode::from_parts("heading", &attrs, h.clone().into_children());
        assert_eq!(h, rebuilt);
    }
}
