//! Edit tool: fuzzy-matching file editor.
//!
//! Finds `oldString` in a file through the strict-to-fuzzy matcher cascade
//! and replaces it with `newString`. Returns a unified diff of the change.
//! Failures come back as error results whose text tells the model how to
//! retry.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::edit::diff::{self, DiffStats};
use crate::edit::{self as engine, EditRequest, Strategy};
use crate::error::{CoderError, CoderResult};
use crate::tools::{ToolCallResult, ToolDefinition};

/// Name under which the router exposes this tool.
pub const TOOL_NAME: &str = "edit";

/// Parameters for the edit tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditParams {
    /// Path to the file to edit (relative to workspace or absolute).
    pub file_path: String,
    /// The text to find and replace.
    pub old_string: String,
    /// The replacement text.
    pub new_string: String,
    /// Replace every occurrence instead of requiring a unique match.
    #[serde(default)]
    pub replace_all: bool,
}

/// What a successful edit did.
#[derive(Debug)]
pub enum EditOutcome {
    Created {
        path: PathBuf,
    },
    Edited {
        path: PathBuf,
        strategy: Strategy,
        replacements: usize,
        stats: DiffStats,
        diff: String,
    },
}

impl EditOutcome {
    fn render(&self) -> String {
        match self {
            Self::Created { path } => format!("Created new file: {}", path.display()),
            Self::Edited {
                path,
                strategy,
                replacements,
                stats,
                diff,
            } => format!(
                "Edited {} ({strategy} match, {replacements} replacement(s), +{} -{})\n\n{diff}",
                path.display(),
                stats.added,
                stats.removed,
            ),
        }
    }
}

/// Return the tool definition for `edit`.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_NAME.to_owned(),
        description: "Edit a file by replacing oldString with newString. oldString is located \
            exactly first, then with per-line whitespace, indentation, and first/last-line anchor \
            tolerance. The edit fails if oldString matches more than once unless replaceAll is \
            set. If oldString is empty and the file doesn't exist, creates it with newString."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Path to the file to edit"
                },
                "oldString": {
                    "type": "string",
                    "description": "The text to find (empty string = create new file)"
                },
                "newString": {
                    "type": "string",
                    "description": "The replacement text"
                },
                "replaceAll": {
                    "type": "boolean",
                    "description": "Replace all occurrences (default: false)",
                    "default": false
                }
            },
            "required": ["filePath", "oldString", "newString"]
        }),
    }
}

/// Execute the edit tool.
///
/// Expected failures (bad path, no match, ambiguous match) are returned as
/// error results; only malformed arguments and I/O failures are `Err`.
pub fn execute(config: &EditorConfig, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: EditParams =
        serde_json::from_value(arguments).context("invalid edit parameters")?;

    let file_path = match super::validate_path(&config.workspace, &params.file_path) {
        Ok(p) => p,
        Err(e) => return Ok(ToolCallResult::error(format!("Error: {e}"))),
    };

    match edit_file(config, &file_path, &params) {
        Ok(outcome) => Ok(ToolCallResult::text(outcome.render())),
        Err(err @ CoderError::Io { .. }) => Err(err.into()),
        Err(err) => {
            warn!(path = %file_path.display(), error = %err, "edit rejected");
            Ok(ToolCallResult::error(retry_message(&err)))
        }
    }
}

fn retry_message(err: &CoderError) -> String {
    match err {
        CoderError::FileNotFound { .. } => format!(
            "Error: {err}. Verify the path, or pass an empty oldString to create a new file."
        ),
        CoderError::FileExists { .. } => format!(
            "Error: {err}. oldString cannot be empty for an existing file; provide the text to \
             find and replace."
        ),
        CoderError::NoChange { .. } => format!(
            "Error: {err}. The matched text already equals newString; check the file content."
        ),
        _ => format!("Error: {err}"),
    }
}

/// Apply one edit to `file_path`, which must already be validated.
pub fn edit_file(
    config: &EditorConfig,
    file_path: &Path,
    params: &EditParams,
) -> CoderResult<EditOutcome> {
    if params.old_string.is_empty() {
        return create_file(config, file_path, &params.new_string);
    }

    if !file_path.exists() {
        return Err(CoderError::FileNotFound {
            path: file_path.to_path_buf(),
        });
    }

    let original = std::fs::read_to_string(file_path).map_err(|source| CoderError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;

    let request = EditRequest::new(&params.old_string, &params.new_string)
        .replace_all(params.replace_all);

    let applied = engine::apply(&original, &request).map_err(|source| {
        let (preview, lines) = preview(&original, config.preview_lines);
        CoderError::Edit {
            path: file_path.to_path_buf(),
            source,
            preview,
            lines,
        }
    })?;

    if applied.content == original {
        return Err(CoderError::NoChange {
            path: file_path.to_path_buf(),
        });
    }

    let shown = file_path
        .strip_prefix(&config.workspace)
        .unwrap_or(file_path)
        .display()
        .to_string();
    let diff = diff::unified_diff(&shown, &original, &applied.content);
    let stats = diff::diff_stats(&original, &applied.content);

    crate::util::atomic::atomic_write(file_path, &applied.content).map_err(|e| {
        CoderError::Io {
            path: file_path.to_path_buf(),
            source: std::io::Error::other(e),
        }
    })?;

    info!(
        path = %shown,
        strategy = applied.strategy.name(),
        replacements = applied.replacements,
        "edit applied"
    );

    Ok(EditOutcome::Edited {
        path: file_path.to_path_buf(),
        strategy: applied.strategy,
        replacements: applied.replacements,
        stats,
        diff,
    })
}

fn create_file(config: &EditorConfig, file_path: &Path, content: &str) -> CoderResult<EditOutcome> {
    if file_path.exists() {
        return Err(CoderError::FileExists {
            path: file_path.to_path_buf(),
        });
    }
    if !config.create_missing {
        return Err(CoderError::FileNotFound {
            path: file_path.to_path_buf(),
        });
    }

    let io_err = |source| CoderError::Io {
        path: file_path.to_path_buf(),
        source,
    };

    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    crate::util::atomic::atomic_write(file_path, content)
        .map_err(|e| io_err(std::io::Error::other(e)))?;

    info!(path = %file_path.display(), "file created");
    Ok(EditOutcome::Created {
        path: file_path.to_path_buf(),
    })
}

/// First `max_lines` lines of `content` and how many were taken.
fn preview(content: &str, max_lines: usize) -> (String, usize) {
    let lines: Vec<&str> = content.lines().take(max_lines).collect();
    (lines.join("\n"), lines.len())
}
