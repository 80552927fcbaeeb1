//! Last-checked revision persistence.
//!
//! Each watched module has a checkpoint file under `last-revs/` holding the
//! revision number the watcher has fully processed. The file is a plain
//! integer so an operator can inspect or reset it with a text editor.
//!
//! Checkpoints are written atomically. Concurrent access to one module's
//! checkpoint is not serialized here; each module is owned by exactly one
//! watcher thread.

use crate::error::{Result, SvnwatchError};
use crate::fs::atomic_write_file;
use std::path::{Path, PathBuf};

/// Store of per-module checkpoint files in one directory.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Last processed revision for `module`, or `None` on first run.
    pub fn read(&self, module: &str) -> Result<Option<u64>> {
        let path = self.path_for(module);

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            SvnwatchError::UserError(format!(
                "cannot read checkpoint file '{}': {}",
                path.display(),
                e
            ))
        })?;

        content.trim().parse().map(Some).map_err(|_| {
            SvnwatchError::UserError(format!(
                "corrupt checkpoint file '{}': expected a revision number, found '{}'\n\
                 Delete the file to re-baseline the module.",
                path.display(),
                content.trim()
            ))
        })
    }

    /// Record `revision` as fully processed for `module`.
    pub fn write(&self, module: &str, revision: u64) -> Result<()> {
        atomic_write_file(self.path_for(module), &revision.to_string())
    }

    fn path_for(&self, module: &str) -> PathBuf {
        self.dir.join(module)
    }
}
