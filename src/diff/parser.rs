//! Core diff parsing logic.

use log::{debug, warn};
use regex::Regex;
use std::sync::LazyLock;

use super::classify::assign_statuses;
use super::model::{Change, ChangeKind, Escaping, FileDiff};
use super::scanner::{classify, LineKind};

/// Matches the revision annotation on `---`/`+++` marker lines, e.g.
/// `--- srm-pom/pom.xml (revision 3415)`.
static REVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"revision (\d+)").expect("revision pattern is valid"));

/// Sink for scanner diagnostics.
///
/// The parser has no other observable side effect than its return value, so
/// the sink is injected rather than reached through process-global state;
/// tests can capture diagnostics without a logger.
pub trait ParseDiagnostics {
    /// Called for each line preceding any `Index:` marker that matches no
    /// structural category (for example a property-change section).
    /// `diff` is the complete input, for context.
    fn unrecognized_line(&mut self, line: &str, diff: &str);
}

/// Default sink: the offending line at warn level, the full diff at debug
/// level.
#[derive(Debug, Default)]
pub struct LogDiagnostics;

impl ParseDiagnostics for LogDiagnostics {
    fn unrecognized_line(&mut self, line: &str, diff: &str) {
        warn!("skipping unrecognized diff line: {}", line);
        debug!("full diff text:\n{}", diff);
    }
}

/// Parse `svn diff` output into per-file change records.
///
/// `base_url` is prefixed to each file's repository-relative path to form
/// its link URL; a trailing slash is stripped first. Change lines are
/// HTML-escaped and diagnostics go to the `log` crate. The parse never
/// fails: malformed input degrades to skipped lines or default field
/// values, and empty input yields an empty list.
pub fn parse(diff: &str, base_url: &str) -> Vec<FileDiff> {
    parse_with(diff, base_url, Escaping::Html, &mut LogDiagnostics)
}

/// [`parse`] with injected escaping and diagnostics sink.
pub fn parse_with(
    diff: &str,
    base_url: &str,
    escaping: Escaping,
    diagnostics: &mut dyn ParseDiagnostics,
) -> Vec<FileDiff> {
    let base_url = base_url.strip_suffix('/').unwrap_or(base_url);
    let mut files: Vec<FileDiff> = Vec::new();

    for line in diff.lines() {
        match classify(line) {
            LineKind::Index(path) => files.push(FileDiff::new(path, base_url)),
            LineKind::Separator => {}
            LineKind::OldMarker => {
                if let (Some(file), Some(rev)) = (files.last_mut(), extract_revision(line)) {
                    file.rev_from = rev;
                }
            }
            LineKind::NewMarker => {
                if let (Some(file), Some(rev)) = (files.last_mut(), extract_revision(line)) {
                    file.rev_to = rev;
                }
            }
            LineKind::HunkHeader | LineKind::NoNewline => {
                // Kept verbatim for display, excluded from classification.
                if let Some(file) = files.last_mut() {
                    file.changes.push(Change::new(line, ChangeKind::Info, escaping));
                }
            }
            LineKind::Content => match files.last_mut() {
                Some(file) => file.changes.push(content_change(line, escaping)),
                None => diagnostics.unrecognized_line(line, diff),
            },
        }
    }

    assign_statuses(&mut files);
    files
}

/// Build a change from a hunk content line: the first character is the diff
/// marker, the rest is the line text.
fn content_change(line: &str, escaping: Escaping) -> Change {
    let (kind, text) = match line.chars().next() {
        Some('+') => (ChangeKind::Added, &line[1..]),
        Some('-') => (ChangeKind::Removed, &line[1..]),
        Some(marker) => (ChangeKind::Unmodified, &line[marker.len_utf8()..]),
        None => (ChangeKind::Unmodified, ""),
    };
    Change::new(text, kind, escaping)
}

/// Extract the revision number from a `---`/`+++` marker line.
///
/// Returns `None` when the line carries no recognizable annotation, in
/// which case the caller leaves the field at its prior value; revision
/// tracking is a convenience, not a correctness requirement.
fn extract_revision(line: &str) -> Option<u64> {
    REVISION_RE
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn extracts_revision_number() {
        assert_eq!(
            extract_revision("--- srm-pom/pom.xml (revision 3415)"),
            Some(3415)
        );
        assert_eq!(
            extract_revision("+++ srm-pom/pom.xml (revision 3417)"),
            Some(3417)
        );
    }

    #[test]
    fn missing_annotation_yields_none() {
        assert_eq!(extract_revision("--- srm-pom/pom.xml"), None);
        assert_eq!(extract_revision("--- srm-pom/pom.xml (working copy)"), None);
    }

    #[test]
    fn revision_zero_is_extracted() {
        assert_eq!(extract_revision("--- test.txt (revision 0)"), Some(0));
    }

    #[test]
    fn huge_revision_numbers_are_ignored() {
        // A number that overflows u64 parses as "no revision found".
        assert_eq!(
            extract_revision("--- f (revision 99999999999999999999999)"),
            None
        );
    }
}
