//! Error types for the oa-edit crate.

use std::path::PathBuf;

/// Why an edit request was rejected before any matcher ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEditReason {
    /// `old_text` was empty.
    EmptyOldText,
    /// `old_text` and `new_text` were identical.
    NoOp,
}

impl std::fmt::Display for InvalidEditReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOldText => {
                f.write_str("old_string cannot be empty; handle file creation separately")
            }
            Self::NoOp => f.write_str("old_string and new_string must be different"),
        }
    }
}

/// Failures of the matcher cascade.
///
/// All variants leave the input content untouched, so a caller may retry
/// with a different `old_text` against the same original.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Caller-side contract violation. Never retried internally.
    #[error("invalid edit: {reason}")]
    InvalidEdit { reason: InvalidEditReason },

    /// No strategy produced a usable candidate.
    #[error("old_string not found in content (tried all fuzzy matching strategies)")]
    NotFound,

    /// A candidate was found but it occurs more than once.
    #[error(
        "found multiple matches for old_string; provide more surrounding lines in old_string \
         to identify the correct match, or set replaceAll"
    )]
    AmbiguousMatch,
}

/// File-level errors raised by the edit tool.
#[derive(Debug, thiserror::Error)]
pub enum CoderError {
    /// File not found at the specified path.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// An empty `old_string` was supplied for a file that already exists.
    #[error("file already exists: {path}")]
    FileExists { path: PathBuf },

    /// The engine matched but the substitution produced identical content.
    #[error("replacement resulted in no changes to {path}")]
    NoChange { path: PathBuf },

    /// The matcher cascade failed; `preview` holds the first lines of the file.
    #[error("{source}\n\nFile '{path}' preview ({lines} lines):\n---\n{preview}\n---")]
    Edit {
        path: PathBuf,
        source: EditError,
        preview: String,
        lines: usize,
    },

    /// I/O error with context.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for the matcher cascade.
pub type EditResult<T> = Result<T, EditError>;

/// Convenience result type for oa-edit tool operations.
pub type CoderResult<T> = Result<T, CoderError>;
