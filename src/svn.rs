//! Subversion command runner for svnwatch.
//!
//! Provides a safe wrapper around the `svn` client with captured
//! stdout/stderr and structured error handling. All repository queries go
//! through this module; the rest of the program never sees raw command
//! output.

use crate::error::{Result, SvnwatchError};
use regex::Regex;
use std::process::Command;
use std::sync::LazyLock;

/// Matches the `Revision: N` line of `svn info` output.
static REVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Revision: (\d+)").expect("revision pattern is valid"));

/// Matches the header line of an `svn log` entry:
/// `r3417 | jdoe | 2008-05-01 12:00:00 +0200 (Thu, 01 May 2008) | 1 line`.
static LOG_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^r(\d+) \| ([^|]+) \| (.+) \|").expect("log pattern is valid"));

/// Result of a successful svn command execution.
#[derive(Debug, Clone)]
pub struct SvnOutput {
    /// Standard output from the command.
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

/// Run an svn command and capture its output.
///
/// Returns `SvnwatchError::SvnError` when the binary cannot be spawned or
/// exits non-zero; the error message carries the failing subcommand and
/// whatever the client printed to stderr.
pub fn run_svn(args: &[&str]) -> Result<SvnOutput> {
    let output = Command::new("svn")
        .args(args)
        .arg("--non-interactive")
        .output()
        .map_err(|e| {
            SvnwatchError::SvnError(format!(
                "failed to execute svn {}: {} (is the svn client installed?)",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let svn_output = SvnOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    };

    if output.status.success() {
        Ok(svn_output)
    } else {
        Err(SvnwatchError::SvnError(format!(
            "svn {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            output.status.code().unwrap_or(-1),
            if svn_output.stderr.is_empty() {
                svn_output.stdout.trim()
            } else {
                &svn_output.stderr
            }
        )))
    }
}

/// One revision's log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Committer's repository account name.
    pub author: String,
    /// Display name; starts equal to `author`, may be remapped from config.
    pub author_name: String,
    /// Timestamp string as printed by the client.
    pub timestamp: String,
    /// Commit message with surrounding whitespace trimmed.
    pub message: String,
}

impl LogEntry {
    /// The `YYYY-MM-DD` date prefix of the timestamp, used for grouping
    /// diff files by day.
    pub fn date(&self) -> &str {
        self.timestamp
            .split_whitespace()
            .next()
            .unwrap_or(&self.timestamp)
    }

    /// First line of the commit message, for mail subjects.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Client for one repository URL.
#[derive(Debug, Clone)]
pub struct SvnClient {
    repo_url: String,
}

impl SvnClient {
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
        }
    }

    /// Latest revision of the repository, from `svn info`.
    pub fn latest_revision(&self) -> Result<u64> {
        let output = run_svn(&["info", &self.repo_url])?;

        for line in output.stdout.lines() {
            if let Some(caps) = REVISION_RE.captures(line)
                && let Ok(rev) = caps[1].parse()
            {
                return Ok(rev);
            }
        }

        Err(SvnwatchError::SvnError(format!(
            "unable to find the latest revision of '{}'",
            self.repo_url
        )))
    }

    /// Log entry for one revision, or `None` when the revision did not
    /// touch this repository path (the log output has a header but no
    /// entry).
    pub fn log_entry(&self, revision: u64) -> Result<Option<LogEntry>> {
        let rev_arg = revision.to_string();
        let output = run_svn(&["log", "-r", &rev_arg, &self.repo_url])?;
        Ok(parse_log_output(&output.stdout))
    }

    /// Raw `svn diff` text for the change introduced by `revision`.
    pub fn diff(&self, revision: u64) -> Result<String> {
        let range = format!("{}:{}", revision.saturating_sub(1), revision);
        let output = run_svn(&["diff", "-r", &range, &self.repo_url])?;
        Ok(output.stdout)
    }
}

/// Parse `svn log` output for a single revision.
///
/// The format is a dashed separator, a `rN | author | timestamp | n lines`
/// header, a blank line, the message lines, and a closing separator. An
/// empty log (separator only) means the revision is not visible here.
fn parse_log_output(stdout: &str) -> Option<LogEntry> {
    let mut header: Option<(String, String)> = None;
    let mut message = String::new();

    for line in stdout.lines() {
        if let Some(caps) = LOG_HEADER_RE.captures(line) {
            header = Some((caps[2].trim().to_string(), caps[3].trim().to_string()));
            continue;
        }
        if header.is_some() && !line.starts_with("----------") && !line.trim().is_empty() {
            message.push_str(line);
            message.push('\n');
        }
    }

    header.map(|(author, timestamp)| LogEntry {
        author_name: author.clone(),
        author,
        timestamp,
        message: message.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG_OUTPUT: &str = "\
------------------------------------------------------------------------
r3417 | jdoe | 2008-05-01 12:00:00 +0200 (Thu, 01 May 2008) | 2 lines

Bump infrastructure release.
Second message line.
------------------------------------------------------------------------
";

    #[test]
    fn test_parse_log_output() {
        let entry = parse_log_output(LOG_OUTPUT).unwrap();

        assert_eq!(entry.author, "jdoe");
        assert_eq!(entry.author_name, "jdoe");
        assert_eq!(
            entry.timestamp,
            "2008-05-01 12:00:00 +0200 (Thu, 01 May 2008)"
        );
        assert_eq!(
            entry.message,
            "Bump infrastructure release.\nSecond message line."
        );
    }

    #[test]
    fn test_parse_empty_log_output() {
        let stdout = "------------------------------------------------------------------------\n";
        assert_eq!(parse_log_output(stdout), None);
    }

    #[test]
    fn test_parse_log_skips_blank_message_lines() {
        let stdout = "\
------------------------------------------------------------------------
r10 | alice | 2008-05-02 09:30:00 +0200 (Fri, 02 May 2008) | 1 line

Fix the build.

------------------------------------------------------------------------
";
        let entry = parse_log_output(stdout).unwrap();
        assert_eq!(entry.message, "Fix the build.");
    }

    #[test]
    fn test_log_entry_date() {
        let entry = parse_log_output(LOG_OUTPUT).unwrap();
        assert_eq!(entry.date(), "2008-05-01");
    }

    #[test]
    fn test_log_entry_summary_is_first_line() {
        let entry = parse_log_output(LOG_OUTPUT).unwrap();
        assert_eq!(entry.summary(), "Bump infrastructure release.");
    }

    #[test]
    fn test_revision_regex() {
        let info = "Path: infra\nURL: http://svn/repos/infra\nRevision: 3417\n";
        let caps = REVISION_RE.captures(info).unwrap();
        assert_eq!(&caps[1], "3417");
    }

    #[test]
    fn test_run_svn_missing_subcommand_fails() {
        // "svn" with a bogus subcommand either fails to spawn (no client
        // installed) or exits non-zero; both surface as SvnError.
        let result = run_svn(&["definitely-not-a-subcommand"]);
        assert!(matches!(result, Err(SvnwatchError::SvnError(_))));
    }
}
