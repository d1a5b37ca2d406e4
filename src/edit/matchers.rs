//! Matcher implementations for the edit cascade.
//!
//! Each matcher takes `(content, pattern)` and returns the spans of `content`
//! that correspond to `pattern`, first to last. Spans are borrowed from
//! `content`, so a matcher can only delimit text that is really there; the
//! orchestrator in `mod.rs` does the substitution.

use std::borrow::Cow;

use tracing::trace;

use crate::edit::levenshtein;
use crate::edit::lines::{pattern_lines, LineIndex};

// ---------------------------------------------------------------------------
// Simple
// ---------------------------------------------------------------------------

/// Exact substring match. Yields the first literal occurrence, if any.
pub fn simple<'a>(content: &'a str, pattern: &str) -> Vec<&'a str> {
    content
        .find(pattern)
        .map(|idx| &content[idx..idx + pattern.len()])
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// LineTrimmed
// ---------------------------------------------------------------------------

/// Matches line blocks whose lines equal the pattern's lines after trimming.
/// Yields the original text from content, whitespace included.
pub fn line_trimmed<'a>(content: &'a str, pattern: &str) -> Vec<&'a str> {
    let search_lines: Vec<&str> = pattern_lines(pattern).into_iter().map(str::trim).collect();
    if search_lines.is_empty() {
        return Vec::new();
    }

    let index = LineIndex::new(content);
    let size = search_lines.len();

    index
        .lines()
        .windows(size)
        .enumerate()
        .filter(|(_, window)| {
            window
                .iter()
                .zip(&search_lines)
                .all(|(original, search)| original.trim() == *search)
        })
        .map(|(i, _)| index.block(i, i + size - 1))
        .collect()
}

// ---------------------------------------------------------------------------
// IndentationFlexible
// ---------------------------------------------------------------------------

/// Remove the indentation shared by all non-blank lines.
///
/// Indentation is counted in leading whitespace characters. Blank lines pass
/// through untouched. Returns the input unchanged when there is nothing to
/// remove.
pub fn strip_common_indent(text: &str) -> Cow<'_, str> {
    let min_indent = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .min();

    let Some(min_indent) = min_indent.filter(|&n| n > 0) else {
        return Cow::Borrowed(text);
    };

    let stripped: Vec<&str> = text
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line
            } else {
                skip_chars(line, min_indent)
            }
        })
        .collect();

    Cow::Owned(stripped.join("\n"))
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn skip_chars(line: &str, n: usize) -> &str {
    line.char_indices().nth(n).map_or("", |(byte, _)| &line[byte..])
}

/// Matches line blocks that equal the pattern once common indentation is
/// removed from both. Yields the raw, indented block.
pub fn indentation_flexible<'a>(content: &'a str, pattern: &str) -> Vec<&'a str> {
    let search_lines = pattern_lines(pattern);
    if search_lines.is_empty() {
        return Vec::new();
    }

    let joined = search_lines.join("\n");
    let normalized_pattern = strip_common_indent(&joined);
    let first_line = search_lines[0].trim();
    let size = search_lines.len();

    let index = LineIndex::new(content);
    let mut results = Vec::new();

    for (i, window) in index.lines().windows(size).enumerate() {
        // Equal blocks after dedent always share their trimmed first line.
        if window[0].trim() != first_line {
            continue;
        }

        let block = window.join("\n");
        if strip_common_indent(&block) == normalized_pattern {
            results.push(index.block(i, i + size - 1));
        }
    }

    results
}

// ---------------------------------------------------------------------------
// BlockAnchor
// ---------------------------------------------------------------------------

/// Line positions where the trimmed first and last pattern lines both match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AnchorCandidate {
    start: usize,
    end: usize,
}

impl AnchorCandidate {
    const fn block_size(self) -> usize {
        self.end - self.start + 1
    }
}

/// Matches by anchoring on the first and last lines, tolerating edits to the
/// lines between them. Interior lines are scored with Levenshtein similarity.
///
/// Needs at least three pattern lines. A single anchor pair is accepted on
/// any evidence; among several, the best interior average must reach 0.3.
pub fn block_anchor<'a>(content: &'a str, pattern: &str) -> Vec<&'a str> {
    let search_lines = pattern_lines(pattern);
    if search_lines.len() < 3 {
        return Vec::new();
    }

    let index = LineIndex::new(content);
    let lines = index.lines();
    let candidates = anchor_candidates(lines, &search_lines);
    trace!(candidates = candidates.len(), "block anchor candidates");

    let accepted = match candidates.as_slice() {
        [] => None,
        [only] => {
            let similarity = single_candidate_similarity(lines, &search_lines, *only);
            trace!(similarity, "single anchor candidate");
            (similarity >= super::SINGLE_CANDIDATE_SIMILARITY_THRESHOLD).then_some(*only)
        }
        many => best_candidate(lines, &search_lines, many),
    };

    accepted
        .map(|c| index.block(c.start, c.end))
        .into_iter()
        .collect()
}

/// One candidate per start line: the first end anchor at least two lines below it.
fn anchor_candidates(lines: &[&str], search_lines: &[&str]) -> Vec<AnchorCandidate> {
    let first_line = search_lines[0].trim();
    let last_line = search_lines[search_lines.len() - 1].trim();

    let end_anchors: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim() == last_line)
        .map(|(j, _)| j)
        .collect();

    if end_anchors.is_empty() {
        return Vec::new();
    }

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim() == first_line)
        .filter_map(|(start, _)| {
            let next = end_anchors.partition_point(|&j| j < start + 2);
            end_anchors
                .get(next)
                .map(|&end| AnchorCandidate { start, end })
        })
        .collect()
}

fn lines_to_check(search_lines: &[&str], candidate: AnchorCandidate) -> usize {
    (search_lines.len() - 2).min(candidate.block_size() - 2)
}

/// Similarities of the overlapping interior line pairs, skipping blank pairs.
fn interior_scores(
    lines: &[&str],
    search_lines: &[&str],
    candidate: AnchorCandidate,
) -> impl Iterator<Item = f64> {
    (1..=lines_to_check(search_lines, candidate)).filter_map(move |k| {
        levenshtein::line_similarity(lines[candidate.start + k], search_lines[k])
    })
}

/// Running interior average that stops as soon as it reaches the
/// single-candidate threshold.
fn single_candidate_similarity(
    lines: &[&str],
    search_lines: &[&str],
    candidate: AnchorCandidate,
) -> f64 {
    let count = lines_to_check(search_lines, candidate);
    debug_assert!(count > 0, "anchor blocks span at least three lines");

    let mut similarity = 0.0;
    for score in interior_scores(lines, search_lines, candidate) {
        similarity += score / count as f64;
        if similarity >= super::SINGLE_CANDIDATE_SIMILARITY_THRESHOLD {
            break;
        }
    }
    similarity
}

/// Full interior average, no early stop.
fn average_similarity(lines: &[&str], search_lines: &[&str], candidate: AnchorCandidate) -> f64 {
    let count = lines_to_check(search_lines, candidate);
    debug_assert!(count > 0, "anchor blocks span at least three lines");
    interior_scores(lines, search_lines, candidate).sum::<f64>() / count as f64
}

fn best_candidate(
    lines: &[&str],
    search_lines: &[&str],
    candidates: &[AnchorCandidate],
) -> Option<AnchorCandidate> {
    let mut best_match = None;
    let mut max_similarity = -1.0;

    for &candidate in candidates {
        let similarity = average_similarity(lines, search_lines, candidate);
        trace!(
            start = candidate.start,
            end = candidate.end,
            similarity,
            "scored anchor candidate"
        );
        if similarity > max_similarity {
            max_similarity = similarity;
            best_match = Some(candidate);
        }
    }

    if max_similarity >= super::MULTIPLE_CANDIDATES_SIMILARITY_THRESHOLD {
        best_match
    } else {
        None
    }
}

// ===========================================================================
// Tests
// ===========================================================================
