//! Atomic file writing via tempfile + rename.
//!
//! Uses [`tempfile::NamedTempFile`] to write to a temporary file in the same
//! directory as the target, then atomically renames it. An edit either lands
//! completely or not at all.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Atomically write `content` to `path`.
///
/// Creates a temporary file in the same directory as `path`, writes `content`
/// to it, then renames (persists) it to `path`. When `path` already exists its
/// permissions are carried over, so an edited script stays executable.
///
/// # Errors
///
/// Returns an error if the parent directory doesn't exist, writing fails,
/// or the rename fails (e.g., cross-device).
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("no parent directory for {}", path.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temp file in {}", parent.display()))?;

    tmp.write_all(content.as_bytes())
        .with_context(|| format!("failed to write to temp file for {}", path.display()))?;

    tmp.flush()
        .with_context(|| format!("failed to flush temp file for {}", path.display()))?;

    if let Ok(metadata) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("failed to copy permissions of {}", path.display()))?;
    }

    tmp.persist(path)
        .with_context(|| format!("failed to atomically replace {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_and_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("file.txt");

        atomic_write(&path, "first").expect("create");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "first");

        atomic_write(&path, "second").expect("overwrite");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "second");
    }

    #[cfg(unix)]
    #[test]
    fn test_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("run.sh");
        std::fs::write(&path, "#!/bin/sh\n").expect("write");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");

        atomic_write(&path, "#!/bin/sh\necho hi\n").expect("write");

        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_missing_parent_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("no/such/dir/file.txt");
        assert!(atomic_write(&path, "x").is_err());
    }
}
