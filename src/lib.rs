//! `oa-edit`: fuzzy edit engine for model-proposed file edits.
//!
//! Applies an `(old_string, new_string)` replacement to file content even
//! when the model reproduced `old_string` with whitespace drift, the wrong
//! indentation level, or a lightly paraphrased interior line. Fails with a
//! typed, retry-oriented error instead of guessing when the target is
//! missing or ambiguous.
//!
//! # Layers
//!
//! - [`edit`]: pure matching engine with the strict-to-fuzzy matcher
//!   cascade and [`edit::replace`]. No I/O.
//! - [`tools`]: the `edit` tool, covering path validation, diffing and the
//!   atomic write.
//! - `oa-edit` binary: newline-delimited JSON tool calls over stdio.
//!
//! # Architecture
//!
//! ```text
//! stdin (JSON) → ToolRouter → tools::edit → edit::apply → matcher cascade
//! stdout (JSON) ←──────────────┘     ↓
//!                               util::atomic
//! ```

pub mod config;
pub mod edit;
pub mod error;
pub mod tools;
pub mod util;

pub use config::EditorConfig;
pub use edit::{apply, replace, Applied, EditRequest, Strategy};
pub use error::{CoderError, CoderResult, EditError, EditResult, InvalidEditReason};
