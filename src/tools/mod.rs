//! Tool router. Dispatches tool calls to implementations.
//!
//! A tool takes JSON arguments and returns a [`ToolCallResult`]. The router
//! holds the registry and provides `list_tools()` / `call_tool()` for the
//! stdio front end.

pub mod edit;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EditorConfig;

// ---------------------------------------------------------------------------
// Tool-call types
// ---------------------------------------------------------------------------

/// Tool definition with the JSON Schema of its arguments.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// One incoming tool call: `{"name": ..., "arguments": {...}}`.
#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Content item in a tool result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Result of a tool call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// A successful single-text result.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem {
                content_type: "text".to_owned(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    /// A failed single-text result, shown to the model so it can retry.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }
}

// ---------------------------------------------------------------------------
// Path validation
// ---------------------------------------------------------------------------

/// Resolve and validate a file path, ensuring it stays within the workspace.
///
/// Rejects null bytes, `..` traversal escapes, and symlinks that resolve outside
/// the workspace boundary. Returns the canonicalized (or safely joined) path.
pub fn validate_path(workspace: &Path, file_path: &str) -> Result<PathBuf> {
    // Reject null bytes (can bypass C-based path APIs).
    if file_path.contains('\0') {
        bail!("path contains null byte");
    }

    let raw_path = if Path::new(file_path).is_absolute() {
        PathBuf::from(file_path)
    } else {
        workspace.join(file_path)
    };

    // Canonicalize workspace first (resolves symlinks like /var → /private/var on macOS).
    let canonical_workspace = workspace
        .canonicalize()
        .unwrap_or_else(|_| workspace.to_path_buf());

    let canonical_path = if raw_path.exists() {
        raw_path.canonicalize()?
    } else {
        canonicalize_missing(&raw_path)?
    };

    if !canonical_path.starts_with(&canonical_workspace) {
        bail!("path escapes workspace boundary: {file_path}");
    }

    Ok(canonical_path)
}

/// Canonicalize the deepest existing ancestor of a path that does not exist
/// yet, then re-append the missing components.
fn canonicalize_missing(raw_path: &Path) -> Result<PathBuf> {
    let mut ancestor = raw_path;
    let mut suffix_parts = Vec::new();

    while !ancestor.exists() {
        // `..` below a missing directory cannot be resolved.
        let (Some(name), Some(parent)) = (ancestor.file_name(), ancestor.parent()) else {
            bail!("cannot resolve path: {}", raw_path.display());
        };
        suffix_parts.push(name);
        ancestor = parent;
    }

    let mut result = ancestor.canonicalize()?;
    for part in suffix_parts.iter().rev() {
        result.push(part);
    }
    Ok(result)
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Tool router that dispatches tool calls to implementations.
pub struct ToolRouter {
    config: EditorConfig,
}

impl ToolRouter {
    /// Create a new tool router.
    pub const fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    /// List all available tools with their JSON Schema definitions.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![edit::tool_definition()]
    }

    /// Call a tool by name with the given JSON arguments.
    ///
    /// Unknown tools produce an error result rather than an `Err`.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are malformed or file I/O fails.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<ToolCallResult> {
        debug!(tool = name, "dispatching tool call");

        match name {
            edit::TOOL_NAME => edit::execute(&self.config, arguments),
            _ => Ok(ToolCallResult::error(format!("Unknown tool: {name}"))),
        }
    }
}
