//! Runtime configuration for the edit tool and the `oa-edit` binary.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Default number of file lines shown to the model when an edit fails.
pub const DEFAULT_PREVIEW_LINES: usize = 20;

/// Configuration for the edit tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Working directory; edits may not escape it.
    pub workspace: PathBuf,
    /// How many leading lines of the file to include in failure messages.
    pub preview_lines: usize,
    /// Whether an empty `oldString` may create a missing file.
    pub create_missing: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            preview_lines: DEFAULT_PREVIEW_LINES,
            create_missing: true,
        }
    }
}

impl EditorConfig {
    /// Build a config from command-line arguments (program name excluded).
    ///
    /// Recognized flags: `--workspace <path>`, `--preview-lines <n>`,
    /// `--no-create`.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--workspace" => {
                    let value = args.next().context("--workspace requires a path")?;
                    config.workspace = PathBuf::from(value);
                }
                "--preview-lines" => {
                    let value = args.next().context("--preview-lines requires a number")?;
                    config.preview_lines = value
                        .parse()
                        .with_context(|| format!("invalid --preview-lines value: {value}"))?;
                }
                "--no-create" => config.create_missing = false,
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(config)
    }
}
