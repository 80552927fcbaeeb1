//! Diff file delivery.
//!
//! Modules with `diff_dir` configured get one file per revision instead of
//! mail. The commit metadata is prepended as a pseudo diff section so the
//! file stays consumable by tools that expect plain `svn diff` output.

use crate::error::{Result, SvnwatchError};
use crate::fs::atomic_write_file;
use crate::svn::LogEntry;
use std::path::{Path, PathBuf};

/// Write the diff for one revision, returning the file path.
///
/// The file lands at `<diff_dir>/<module>-<revision>.diff`, with an
/// intermediate date directory when `group_by_date` is set.
pub fn write_diff_file(
    diff_dir: &Path,
    group_by_date: bool,
    module: &str,
    revision: u64,
    log: &LogEntry,
    diff: &str,
) -> Result<PathBuf> {
    let dir = if group_by_date {
        diff_dir.join(log.date())
    } else {
        diff_dir.to_path_buf()
    };
    let path = dir.join(format!("{}-{}.diff", module, revision));

    atomic_write_file(&path, &diff_file_content(log, diff)).map_err(|e| {
        SvnwatchError::NotifyError(match e {
            SvnwatchError::UserError(msg) => msg,
            other => other.to_string(),
        })
    })?;

    Ok(path)
}

/// Commit metadata formatted as a diff-like header block, followed by the
/// diff itself.
fn diff_file_content(log: &LogEntry, diff: &str) -> String {
    let mut content = String::new();
    content.push_str("Index: commit message\n");
    content.push_str("===================================================================\n");
    content.push_str("--- commit message\n");
    content.push_str("+++ commit message\n");
    content.push_str("@@ -0,0 +0,0 @@\n\n");
    content.push_str(&format!("Author    : {}\n", log.author_name));
    content.push_str(&format!("Timestamp : {}\n", log.timestamp));
    content.push_str(&format!("Message   : {}\n\n", log.message));
    content.push_str(diff);
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_log() -> LogEntry {
        LogEntry {
            author: "jdoe".to_string(),
            author_name: "John Doe".to_string(),
            timestamp: "2008-05-01 12:00:00 +0200 (Thu, 01 May 2008)".to_string(),
            message: "Bump infrastructure release.".to_string(),
        }
    }

    #[test]
    fn writes_flat_diff_file() {
        let temp_dir = TempDir::new().unwrap();

        let path = write_diff_file(
            temp_dir.path(),
            false,
            "infra",
            3417,
            &sample_log(),
            "Index: pom.xml\n",
        )
        .unwrap();

        assert_eq!(path, temp_dir.path().join("infra-3417.diff"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Index: commit message\n"));
        assert!(content.contains("Author    : John Doe\n"));
        assert!(content.contains("Timestamp : 2008-05-01"));
        assert!(content.contains("Message   : Bump infrastructure release.\n"));
        assert!(content.ends_with("Index: pom.xml\n"));
    }

    #[test]
    fn groups_by_date_when_configured() {
        let temp_dir = TempDir::new().unwrap();

        let path = write_diff_file(
            temp_dir.path(),
            true,
            "infra",
            3417,
            &sample_log(),
            "",
        )
        .unwrap();

        assert_eq!(
            path,
            temp_dir.path().join("2008-05-01").join("infra-3417.diff")
        );
        assert!(path.exists());
    }

    #[test]
    fn unwritable_directory_is_a_notify_error() {
        let err = write_diff_file(
            Path::new("/proc/definitely-not-writable"),
            false,
            "infra",
            1,
            &sample_log(),
            "",
        )
        .unwrap_err();

        assert!(matches!(err, SvnwatchError::NotifyError(_)));
    }
}
