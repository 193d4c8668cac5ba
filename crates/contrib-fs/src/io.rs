//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use fs2::FileExt;
use tracing::debug;

use crate::{Error, Result};

/// What [`write_if_changed`] did with the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The destination did not exist and was created.
    Created,
    /// The destination existed with different content and was replaced.
    Updated,
    /// The destination already held exactly this content.
    Unchanged,
}

impl WriteOutcome {
    pub fn is_written(self) -> bool {
        !matches!(self, WriteOutcome::Unchanged)
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    Ok(())
}

/// Read text content, returning `None` when the file does not exist.
pub fn read_text_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Write `content` only if it differs from what is already on disk.
///
/// Leaves the file (and its modification time) untouched when the content
/// is identical, so regenerated documents do not churn version control.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome> {
    let outcome = match read_text_if_exists(path)? {
        None => WriteOutcome::Created,
        Some(existing) if existing == content => {
            debug!(path = %path.display(), "content unchanged; skipping write");
            return Ok(WriteOutcome::Unchanged);
        }
        Some(_) => WriteOutcome::Updated,
    };

    write_atomic(path, content.as_bytes())?;
    debug!(path = %path.display(), ?outcome, "wrote file");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_is_not_written() {
        assert!(!WriteOutcome::Unchanged.is_written());
        assert!(WriteOutcome::Created.is_written());
        assert!(WriteOutcome::Updated.is_written());
    }

    #[test]
    fn write_atomic_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");

        write_atomic(&path, b"{}").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["package.json".to_string()]);
    }
}
