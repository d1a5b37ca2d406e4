//! Diff generation using the `similar` crate.
//!
//! Generates unified diffs and line counts for display after an edit.

use serde::Serialize;
use similar::{Algorithm, ChangeTag, TextDiff};

/// Lines added and removed by an edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

fn line_diff<'a>(old: &'a str, new: &'a str) -> TextDiff<'a, 'a, 'a, str> {
    TextDiff::configure()
        .algorithm(Algorithm::Patience)
        .diff_lines(old, new)
}

/// Generate a unified diff between old and new content.
///
/// Uses the Patience diff algorithm which produces cleaner diffs
/// for source code by preserving structure.
pub fn unified_diff(file_name: &str, old: &str, new: &str) -> String {
    line_diff(old, new)
        .unified_diff()
        .header(&format!("a/{file_name}"), &format!("b/{file_name}"))
        .to_string()
}

/// Count inserted and deleted lines between old and new content.
pub fn diff_stats(old: &str, new: &str) -> DiffStats {
    let mut stats = DiffStats::default();
    for change in line_diff(old, new).iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => stats.added += 1,
            ChangeTag::Delete => stats.removed += 1,
            ChangeTag::Equal => {}
        }
    }
    stats
}
