//! Parses markdown text into an [`AstNode`] tree.
//!
//! Block structure is scanned line-by-line; inline structure is scanned
//! char-by-char over the joined text of a block. Neither scanner attempts
//! nested delimiters of the same kind (e.g. `**a *b* c**` is not specially
//! handled beyond whichever delimiter closes first) — this is a subset
//! parser, not a CommonMark-conformant one.

use super::node::AstNode;

pub fn parse(markdown: &str) -> AstNode {
    let lines: Vec<&str> = markdown.lines().collect();
    AstNode::Root {
        children: parse_blocks(&lines),
    }
}

fn parse_blocks(lines: &[&str]) -> Vec<AstNode> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }

        if lines[i].trim_start().starts_with("```") {
            let lang = lines[i].trim_start().trim_start_matches("```").trim();
            let lang = if lang.is_empty() { None } else { Some(lang.to_string()) };
            let mut j = i + 1;
            let mut value_lines = Vec::new();
            while j < lines.len() && lines[j].trim_end() != "```" {
                value_lines.push(lines[j]);
                j += 1;
            }
            out.push(AstNode::Code {
                lang,
                value: value_lines.join("\n"),
            });
            i = (j + 1).min(lines.len());
            continue;
        }

        if is_thematic_break(lines[i]) {
            out.push(AstNode::ThematicBreak);
            i += 1;
            continue;
        }

        if let Some((depth, text)) = parse_heading(lines[i]) {
            out.push(AstNode::Heading {
                depth,
                children: parse_inline(text),
            });
            i += 1;
            continue;
        }

        if lines[i].trim_start().starts_with('>') {
            let mut j = i;
            let mut inner = Vec::new();
            while j < lines.len() && lines[j].trim_start().starts_with('>') {
                inner.push(strip_blockquote_marker(lines[j]));
                j += 1;
            }
            let inner_refs: Vec<&str> = inner.iter().map(String::as_str).collect();
            out.push(AstNode::Blockquote {
                children: parse_blocks(&inner_refs),
            });
            i = j;
            continue;
        }

        if let Some(kind) = list_marker_kind(lines[i]) {
            let (items, next_i) = parse_list(lines, i, &kind);
            out.push(AstNode::List {
                ordered: kind.ordered,
                start: kind.start,
                children: items,
            });
            i = next_i;
            continue;
        }

        let mut j = i;
        let mut text_lines = Vec::new();
        while j < lines.len()
            && !lines[j].trim().is_empty()
            && !is_thematic_break(lines[j])
            && parse_heading(lines[j]).is_none()
            && !lines[j].trim_start().starts_with('>')
            && !lines[j].trim_start().starts_with("```")
            && list_marker_kind(lines[j]).is_none()
        {
            text_lines.push(lines[j].trim());
            j += 1;
        }
        out.push(AstNode::Paragraph {
            children: parse_inline(&text_lines.join(" ")),
        });
        i = j.max(i + 1);
    }
    out
}

fn is_thematic_break(line: &str) -> bool {
    let t = line.trim();
    let Some(c) = t.chars().next() else { return false };
    if t.len() < 3 || (c != '-' && c != '*' && c != '_') {
        return false;
    }
    t.chars().all(|ch| ch == c || ch.is_whitespace()) && t.chars().filter(|&ch| ch == c).count() >= 3
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let t = line.trim_start();
    let hashes = t.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &t[hashes..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((hashes as u8, rest.trim_start()))
}

fn strip_blockquote_marker(line: &str) -> String {
    let t = line.trim_start().strip_prefix('>').unwrap_or(line);
    t.strip_prefix(' ').unwrap_or(t).to_string()
}

struct ListKind {
    ordered: bool,
    start: Option<u32>,
}

fn list_marker_kind(line: &str) -> Option<ListKind> {
    let t = line.trim_start();
    if t.starts_with("- ") || t.starts_with("* ") || t.starts_with("+ ") {
        return Some(ListKind { ordered: false, start: None });
    }
    let digits: String = t.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let after = &t[digits.len()..];
    if after.starts_with(". ") {
        let n: u32 = digits.parse().unwrap_or(1);
        return Some(ListKind {
            ordered: true,
            start: Some(n),
        });
    }
    None
}

fn parse_list(lines: &[&str], start_idx: usize, kind: &ListKind) -> (Vec<AstNode>, usize) {
    let mut items = Vec::new();
    let mut i = start_idx;
    loop {
        let Some(this_kind) = (i < lines.len()).then(|| list_marker_kind(lines[i])).flatten() else {
            break;
        };
        if this_kind.ordered != kind.ordered {
            break;
        }
        let trimmed = lines[i].trim_start();
        let marker_len = if this_kind.ordered {
            trimmed.find(". ").map_or(0, |p| p + 2)
        } else {
            2
        };
        let mut text_lines = vec![trimmed[marker_len..].trim().to_string()];
        let mut j = i + 1;
        while j < lines.len() && !lines[j].trim().is_empty() && list_marker_kind(lines[j]).is_none() {
            text_lines.push(lines[j].trim().to_string());
            j += 1;
        }
        items.push(AstNode::ListItem {
            children: vec![AstNode::Paragraph {
                children: parse_inline(&text_lines.join(" ")),
            }],
        });
        i = j;
    }
    (items, i)
}

pub fn parse_inline(text: &str) -> Vec<AstNode> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '!' && chars.get(i + 1) == Some(&'[') {
            if let Some((node, next)) = try_image(&chars, i) {
                flush(&mut buf, &mut out);
                out.push(node);
                i = next;
                continue;
            }
        }
        if chars[i] == '[' {
            if let Some((node, next)) = try_link(&chars, i) {
                flush(&mut buf, &mut out);
                out.push(node);
                i = next;
                continue;
            }
        }
        if chars[i] == '*' && chars.get(i + 1) == Some(&'*') {
            if let Some((inner, next)) = find_closing(&chars, i + 2, "**") {
                flush(&mut buf, &mut out);
                out.push(AstNode::Strong {
                    children: parse_inline(&inner),
                });
                i = next;
                continue;
            }
        }
        if chars[i] == '*' {
            if let Some((inner, next)) = find_closing(&chars, i + 1, "*") {
                flush(&mut buf, &mut out);
                out.push(AstNode::Emphasis {
                    children: parse_inline(&inner),
                });
                i = next;
                continue;
            }
        }
        if chars[i] == '`' {
            if let Some((inner, next)) = find_closing(&chars, i + 1, "`") {
                flush(&mut buf, &mut out);
                out.push(AstNode::InlineCode { value: inner });
                i = next;
                continue;
            }
        }
        buf.push(chars[i]);
        i += 1;
    }
    flush(&mut buf, &mut out);
    out
}

fn flush(buf: &mut String, out: &mut Vec<AstNode>) {
    if !buf.is_empty() {
        out.push(AstNode::Text {
            value: std::mem::take(buf),
        });
    }
}

fn find_closing(chars: &[char], start: usize, delim: &str) -> Option<(String, usize)> {
    let delim_chars: Vec<char> = delim.chars().collect();
    let mut i = start;
    while i + delim_chars.len() <= chars.len() {
        if chars[i..i + delim_chars.len()] == delim_chars[..] {
            return Some((chars[start..i].iter().collect(), i + delim_chars.len()));
        }
        i += 1;
    }
    None
}

fn try_link(chars: &[char], start: usize) -> Option<(AstNode, usize)> {
    let close_bracket = find_char(chars, start + 1, ']')?;
    if chars.get(close_bracket + 1) != Some(&'(') {
        return None;
    }
    let close_paren = find_char(chars, close_bracket + 2, ')')?;
    let label: String = chars[start + 1..close_bracket].iter().collect();
    let inside: String = chars[close_bracket + 2..close_paren].iter().collect();
    let (url, title) = split_url_title(&inside);
    Some((
        AstNode::Link {
            url,
            title,
            children: parse_inline(&label),
        },
        close_paren + 1,
    ))
}

fn try_image(chars: &[char], start: usize) -> Option<(AstNode, usize)> {
    let bracket = start + 1;
    let close_bracket = find_char(chars, bracket + 1, ']')?;
    if chars.get(close_bracket + 1) != Some(&'(') {
        return None;
    }
    let close_paren = find_char(chars, close_bracket + 2, ')')?;
    let alt: String = chars[bracket + 1..close_bracket].iter().collect();
    let inside: String = chars[close_bracket + 2..close_paren].iter().collect();
    let (url, title) = split_url_title(&inside);
    Some((AstNode::Image { url, alt, title }, close_paren + 1))
}

fn find_char(chars: &[char], start: usize, target: char) -> Option<usize> {
    chars[start..].iter().position(|&c| c == target).map(|p| p + start)
}

fn split_url_title(inside: &str) -> (String, Option<String>) {
    match inside.find('"') {
        Some(q) => {
            let url = inside[..q].trim().to_string();
            let title = inside[q..].trim().trim_matches('"').to_string();
            (url, if title.is_empty() { None } else { Some(title) })
        }
        None => (inside.trim().to_string(), None),
    }
}
