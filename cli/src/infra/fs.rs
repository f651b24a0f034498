//! Filesystem helpers — atomic writes and tolerant removal.

use std::path::Path;

use anyhow::{Context, Result};

/// Write `content` to `path` atomically (temp file + rename).
///
/// A failed write removes the temp file and leaves any previous file at
/// `path` untouched, so a crashed apply never leaves half a config behind.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or the rename fails.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    if let Err(e) = std::fs::write(&temp_path, content) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("writing temp file {}", temp_path.display()));
    }
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("finalizing {}", path.display()));
    }
    Ok(())
}

/// Remove `path` if it exists. Returns whether anything was removed.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path).with_context(|| format!("removing {}", path.display()))?;
    Ok(true)
}
