//! Renders an [`AstNode`] back to markdown text.
//!
//! Paired with [`super::parse::parse`], this is a deliberately small
//! CommonMark subset: enough structure (headings, paragraphs, lists,
//! blockquotes, code fences, thematic breaks, and the common inline spans)
//! to round-trip documents built from it, not a general-purpose renderer.

use super::node::AstNode;

/// Renders a full document. Only meaningful on `AstNode::Root`.
pub fn stringify(node: &AstNode) -> String {
    match node {
        AstNode::Root { children } => {
            let mut out = stringify_blocks(children);
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out
        }
        other => stringify_inline(std::slice::from_ref(other)),
    }
}

fn stringify_blocks(blocks: &[AstNode]) -> String {
    blocks.iter().map(stringify_block).collect::<Vec<_>>().join("\n\n")
}

fn stringify_block(node: &AstNode) -> String {
    match node {
        AstNode::Heading { depth, children } => {
            format!("{} {}", "#".repeat(*depth as usize), stringify_inline(children))
        }
        AstNode::Paragraph { children } => stringify_inline(children),
        AstNode::ThematicBreak => "---".to_string(),
        AstNode::Code { lang, value } => {
            format!("```{}\n{}\n```", lang.as_deref().unwrap_or(""), value)
        }
        AstNode::Blockquote { children } => stringify_blocks(children)
            .lines()
            .map(|l| if l.is_empty() { ">".to_string() } else { format!("> {l}") })
            .collect::<Vec<_>>()
            .join("\n"),
        AstNode::List { ordered, start, children } => {
            let mut n = start.unwrap_or(1);
            children
                .iter()
                .map(|item| {
                    let marker = if *ordered {
                        let m = format!("{n}. ");
                        n += 1;
                        m
                    } else {
                        "- ".to_string()
                    };
                    let text = match item {
                        AstNode::ListItem { children } => stringify_blocks(children),
                        other => stringify_block(other),
                    };
                    format!("{marker}{text}")
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        AstNode::ListItem { children } => stringify_blocks(children),
        other => stringify_inline(std::slice::from_ref(other)),
    }
}

fn stringify_inline(nodes: &[AstNode]) -> String {
    nodes
        .iter()
        .map(|n| match n {
            AstNode::Text { value } => value.clone(),
            AstNode::Emphasis { children } => format!("*{}*", stringify_inline(children)),
            AstNode::Strong { children } => format!("**{}**", stringify_inline(children)),
            AstNode::InlineCode { value } => format!("`{value}`"),
            AstNode::Link { url, title, children } => {
                format!("[{}]({}{})", stringify_inline(children), url, title_suffix(title))
            }
            AstNode::Image { url, alt, title } => format!("![{alt}]({}{})", url, title_suffix(title)),
            other => stringify_block(other),
        })
        .collect()
}

fn title_suffix(title: &Option<String>) -> String {
    match title {
        Some(t) => format!(" \"{t}\""),
        None => String::new(),
    }
}
