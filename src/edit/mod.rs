//! Fuzzy matching edit engine.
//!
//! Applies an `(old_text, new_text)` substitution to file content even when
//! `old_text` drifted from the file in whitespace, indentation, or a few
//! interior lines.
//!
//! # Architecture
//!
//! Each matcher takes `(content, pattern)` and returns a `Vec<&str>` of
//! candidate spans borrowed from `content`. The orchestrator then:
//! 1. For each candidate, finds its position in content via `str::find()`
//! 2. If `replace_all` → `content.replace(candidate, new)`
//! 3. If not `replace_all` → verifies uniqueness (single occurrence), else skips
//!
//! # Cascade
//!
//! 1. [`Strategy::Simple`]: exact substring match
//! 2. [`Strategy::LineTrimmed`]: trim each line before comparing
//! 3. [`Strategy::IndentationFlexible`]: remove common indentation
//! 4. [`Strategy::BlockAnchor`]: anchor on first/last lines + Levenshtein
//!
//! The order is strict to fuzzy: an exact match always wins.

pub mod diff;
pub mod levenshtein;
mod lines;
pub mod matchers;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{EditError, EditResult, InvalidEditReason};

/// Accept threshold when exactly one anchor pair exists.
const SINGLE_CANDIDATE_SIMILARITY_THRESHOLD: f64 = 0.0;
/// Accept threshold for the best of several anchor pairs.
const MULTIPLE_CANDIDATES_SIMILARITY_THRESHOLD: f64 = 0.3;

/// A matcher: takes (content, pattern) and returns the spans of content
/// that match the pattern, first to last.
type Matcher = for<'a> fn(&'a str, &str) -> Vec<&'a str>;

/// Matching strategies, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Simple,
    LineTrimmed,
    IndentationFlexible,
    BlockAnchor,
}

impl Strategy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::LineTrimmed => "line_trimmed",
            Self::IndentationFlexible => "indentation_flexible",
            Self::BlockAnchor => "block_anchor",
        }
    }

    /// Run only this strategy's matcher.
    pub fn find<'a>(self, content: &'a str, pattern: &str) -> Vec<&'a str> {
        let matcher: Matcher = match self {
            Self::Simple => matchers::simple,
            Self::LineTrimmed => matchers::line_trimmed,
            Self::IndentationFlexible => matchers::indentation_flexible,
            Self::BlockAnchor => matchers::block_anchor,
        };
        matcher(content, pattern)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The ordered cascade.
pub const CASCADE: [Strategy; 4] = [
    Strategy::Simple,
    Strategy::LineTrimmed,
    Strategy::IndentationFlexible,
    Strategy::BlockAnchor,
];

/// A substitution request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRequest<'r> {
    pub old_text: &'r str,
    pub new_text: &'r str,
    pub replace_all: bool,
}

impl<'r> EditRequest<'r> {
    pub const fn new(old_text: &'r str, new_text: &'r str) -> Self {
        Self {
            old_text,
            new_text,
            replace_all: false,
        }
    }

    #[must_use]
    pub const fn replace_all(mut self, replace_all: bool) -> Self {
        self.replace_all = replace_all;
        self
    }

    /// Reject empty and no-op requests.
    pub fn validate(&self) -> EditResult<()> {
        let reason = if self.old_text.is_empty() {
            InvalidEditReason::EmptyOldText
        } else if self.old_text == self.new_text {
            InvalidEditReason::NoOp
        } else {
            return Ok(());
        };
        Err(EditError::InvalidEdit { reason })
    }
}

/// Outcome of a successful edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The complete new content.
    pub content: String,
    /// Strategy whose candidate was substituted.
    pub strategy: Strategy,
    /// Number of occurrences replaced (1 unless `replace_all`).
    pub replacements: usize,
}

/// Try to replace `old` with `new` in `content` using the matcher cascade.
///
/// - For each strategy, for each candidate it yields:
///   - Find the candidate in content
///   - If `replace_all` → replace all occurrences and return
///   - If not `replace_all` → check uniqueness; if unique, replace; if ambiguous, skip
/// - If the cascade is exhausted → [`EditError::AmbiguousMatch`] when any
///   candidate was skipped as ambiguous, otherwise [`EditError::NotFound`]
pub fn replace(content: &str, old: &str, new: &str, replace_all: bool) -> EditResult<String> {
    let request = EditRequest::new(old, new).replace_all(replace_all);
    apply(content, &request).map(|applied| applied.content)
}

/// Like [`replace`], reporting which strategy matched.
pub fn apply(content: &str, request: &EditRequest<'_>) -> EditResult<Applied> {
    request.validate()?;

    let mut any_ambiguous = false;

    for strategy in CASCADE {
        let candidates = strategy.find(content, request.old_text);
        trace!(strategy = strategy.name(), candidates = candidates.len(), "matcher ran");

        for search in candidates {
            // An empty span would splice text between arbitrary characters.
            // It occurs everywhere, so it is ambiguous unless content is empty.
            if search.is_empty() {
                if !request.replace_all && !content.is_empty() {
                    any_ambiguous = true;
                }
                continue;
            }
            let Some(index) = content.find(search) else {
                continue;
            };

            if request.replace_all {
                let replacements = content.matches(search).count();
                debug!(strategy = strategy.name(), replacements, "replace_all match");
                return Ok(Applied {
                    content: content.replace(search, request.new_text),
                    strategy,
                    replacements,
                });
            }

            // Check uniqueness: last occurrence must equal first occurrence.
            if content.rfind(search) != Some(index) {
                debug!(strategy = strategy.name(), "ambiguous match, skipping");
                any_ambiguous = true;
                continue;
            }

            debug!(strategy = strategy.name(), "unique match found");
            let mut result =
                String::with_capacity(content.len() - search.len() + request.new_text.len());
            result.push_str(&content[..index]);
            result.push_str(request.new_text);
            result.push_str(&content[index + search.len()..]);
            return Ok(Applied {
                content: result,
                strategy,
                replacements: 1,
            });
        }
    }

    if any_ambiguous {
        debug!("found matches but all were ambiguous");
        Err(EditError::AmbiguousMatch)
    } else {
        Err(EditError::NotFound)
    }
}
