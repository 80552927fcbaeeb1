//! Atomic file writes.
//!
//! Checkpoint and diff files are written through a temp-file-and-rename
//! sequence so a crash mid-write never leaves a truncated file behind:
//! the content goes to `.{filename}.tmp` in the target directory, is synced
//! to disk, and then renamed over the target. Rename is atomic on POSIX
//! when source and target share a filesystem; elsewhere the existing target
//! is removed first, which narrows but does not eliminate the window.

use crate::error::{Result, SvnwatchError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write a string to a file, creating parent directories as needed.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            SvnwatchError::UserError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;
    replace_file(&temp_path, path)
}

/// Temp file path alongside the target: `.{filename}.tmp`.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            SvnwatchError::UserError(format!("invalid file path '{}'", target.display()))
        })?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let result = File::create(path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .map_err(|e| {
            SvnwatchError::UserError(format!("failed to write '{}': {}", path.display(), e))
        });

    if result.is_err() {
        let _ = fs::remove_file(path);
    }
    result
}

#[cfg(unix)]
fn replace_file(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        SvnwatchError::UserError(format!("failed to replace '{}': {}", target.display(), e))
    })
}

#[cfg(not(unix))]
fn replace_file(source: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        let _ = fs::remove_file(target);
    }
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        SvnwatchError::UserError(format!("failed to replace '{}': {}", target.display(), e))
    })
}
