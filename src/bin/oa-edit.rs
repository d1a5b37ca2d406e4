//! oa-edit -- apply fuzzy file edits from newline-delimited JSON tool calls.
//!
//! Usage: oa-edit [--workspace <path>] [--preview-lines <n>] [--no-create]
//!
//! Each stdin line is `{"name": "edit", "arguments": {...}}`; each stdout
//! line is the JSON tool result.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use oa_edit::tools::{ToolCall, ToolCallResult, ToolRouter};
use tracing::{debug, error, info, warn};

fn main() -> Result<()> {
    // Initialize tracing to stderr so it does not interfere with stdout results.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = oa_edit::EditorConfig::from_args(std::env::args().skip(1))?;
    config.workspace = config
        .workspace
        .canonicalize()
        .with_context(|| format!("invalid workspace {}", config.workspace.display()))?;

    info!(workspace = %config.workspace.display(), "oa-edit starting");
    let router = ToolRouter::new(config);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let result = handle_line(&router, trimmed);
        let json = serde_json::to_string(&result).context("failed to serialize result")?;
        debug!(response = json, "sending result");
        writeln!(stdout, "{json}").context("failed to write to stdout")?;
        stdout.flush().context("failed to flush stdout")?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}

fn handle_line(router: &ToolRouter, line: &str) -> ToolCallResult {
    let call: ToolCall = match serde_json::from_str(line) {
        Ok(call) => call,
        Err(e) => {
            warn!(error = %e, "invalid tool call");
            return ToolCallResult::error(format!("Error: parse error: {e}"));
        }
    };

    router
        .call_tool(&call.name, call.arguments)
        .unwrap_or_else(|e| {
            error!(tool = call.name, error = %e, "tool call failed");
            ToolCallResult::error(format!("Error: {e:#}"))
        })
}
