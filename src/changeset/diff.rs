//! Fingerprint-based tree diff (§4.3).
//!
//! Each level is diffed independently with a classic LCS alignment over
//! sibling fingerprints; matched pairs that are both parents are recursed
//! into, so a change deep inside one paragraph never perturbs its
//! siblings. Backtrack tie-break: prefer a diagonal (match) step whenever
//! fingerprints agree; otherwise take the old-side step whenever
//! `dp[i+1][j] >= dp[i][j+1]`, else the new-side step. This is the
//! standard LCS-diff convention and is what gives a deterministic,
//! reproducible alignment for any two fingerprint sequences.

use crate::ast::{AstNode, fingerprint};

use super::types::{IndexChange, IndexOp};

/// Diffs `old` against `new`, writing every change as an [`IndexChange`]
/// into `out`. Call with `old`/`new` as the two document roots and an
/// empty `path`.
pub fn diff(old: &AstNode, new: &AstNode, out: &mut Vec<IndexChange>) {
    let mut path = Vec::new();
    diff_children(old.children().unwrap_or(&[]), new.children().unwrap_or(&[]), &mut path, out);
}

fn diff_children(old: &[AstNode], new: &[AstNode], path: &mut Vec<usize>, out: &mut Vec<IndexChange>) {
    let n = old.len();
    let m = new.len();
    let fp_old: Vec<String> = old.iter().map(fingerprint).collect();
    let fp_new: Vec<String> = new.iter().map(fingerprint).collect();

    // dp[i][j] = length of the longest common subsequence of fp_old[i..] and fp_new[j..].
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = if fp_old[i] == fp_new[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    let mut i = 0;
    let mut j = 0;
    // Consecutive new-side-only steps are buffered here and flushed as one
    // `Insert` once interrupted by a match or a delete, so the resolver can
    // chain them instead of anchoring every one to the same predecessor.
    let mut pending_insert_index: Option<usize> = None;
    let mut pending_insert_nodes: Vec<AstNode> = Vec::new();

    macro_rules! flush_inserts {
        () => {
            if let Some(index) = pending_insert_index.take() {
                out.push(IndexChange {
                    path: path.clone(),
                    op: IndexOp::Insert {
                        index,
                        nodes: std::mem::take(&mut pending_insert_nodes),
                    },
                });
            }
        };
    }

    while i < n && j < m {
        if fp_old[i] == fp_new[j] {
            flush_inserts!();
            if old[i].children().is_some() && new[j].children().is_some() {
                path.push(i);
                diff_children(old[i].children().unwrap(), new[j].children().unwrap(), path, out);
                path.pop();
            }
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            flush_inserts!();
            out.push(IndexChange {
                path: path.clone(),
                op: IndexOp::Delete { index: i },
            });
            i += 1;
        } else {
            pending_insert_index.get_or_insert(i);
            pending_insert_nodes.push(new[j].clone());
            j += 1;
        }
    }
    while j < m {
        pending_insert_index.get_or_insert(i);
        pending_insert_nodes.push(new[j].clone());
        j += 1;
    }
    flush_inserts!();
    while i < n {
        out.push(IndexChange {
            path: path.clone(),
            op: IndexOp::Delete { index: i },
        });
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;

    fn run_diff(old: &str, new: &str) -> Vec<IndexChange> {
        let old_ast = parse(old);
        let new_ast = parse(new);
        let mut out = Vec::new();
        diff(&old_ast, &new_ast, &mut out);
        out
    }

    #[test]
    fn no_changes_for_identical_documents() {
        let changes = run_diff("# A\n\nB", "# A\n\nB");
        assert!(changes.is_empty());
    }

    // Code blocks are leaves whose fingerprint is their full text, so (unlike
    // paragraphs, whose parent fingerprint ignores content) distinct code
    // blocks are actually distinguishable to the diff -- the right fixture
    // for testing whole-sibling insert/delete detection rather than recursion.

    #[test]
    fn detects_a_single_insertion() {
        let changes = run_diff("```\nfirst\n```\n\n```\nthird\n```", "```\nfirst\n```\n\n```\nsecond\n```\n\n```\nthird\n```");
        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0].op, IndexOp::Insert { index: 1, .. }));
    }

    #[test]
    fn detects_a_single_deletion() {
        let changes = run_diff(
            "```\nfirst\n```\n\n```\nsecond\n```\n\n```\nthird\n```",
            "```\nfirst\n```\n\n```\nthird\n```",
        );
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].op, IndexOp::Delete { index: 1 });
    }

    #[test]
    fn recurses_into_a_matched_parent_whose_content_changed() {
        let changes = run_diff("# Title\n\nOld text.", "# Title\n\nNew text.");
        // A paragraph's fingerprint covers only its type (no attributes),
        // so both paragraphs match at the top level and the diff recurses
        // into their inline children, where the changed `Text` leaf shows
        // up as a delete-then-insert pair, addressed one level deep.
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.path == vec![1]));
    }

    #[test]
    fn recurses_into_a_matched_list_item() {
        let changes = run_diff("- a\n- b", "- a\n- b2");
        assert!(changes.iter().any(|c| !c.path.is_empty()));
    }
}
