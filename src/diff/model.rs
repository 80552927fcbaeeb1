//! Data model for parsed diffs.

use serde::Serialize;
use std::fmt;

/// Kind of a single diff line attributed to a file.
///
/// `Info` marks structural lines kept for display (hunk headers, the
/// "no newline at end of file" marker) that are excluded from file-status
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeKind {
    #[serde(rename = "unmod")]
    Unmodified,
    #[serde(rename = "added")]
    Added,
    #[serde(rename = "removed")]
    Removed,
    #[serde(rename = "info")]
    Info,
}

impl ChangeKind {
    /// Whether this change participates in file-status classification.
    pub fn is_counted(self) -> bool {
        self != ChangeKind::Info
    }

    /// The short tag used in serialized output and templates.
    pub fn as_tag(self) -> &'static str {
        match self {
            ChangeKind::Unmodified => "unmod",
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Info => "info",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Terminal status of a file entry within a diff.
///
/// `Copied` and `Moved` are part of the taxonomy but are never produced by
/// the classifier; rename detection would need path heuristics that the
/// Subversion diff output does not support reliably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(dead_code)]
pub enum FileStatus {
    #[serde(rename = "added")]
    Added,
    #[serde(rename = "removed")]
    Removed,
    #[serde(rename = "mod")]
    Modified,
    #[serde(rename = "cp")]
    Copied,
    #[serde(rename = "mv")]
    Moved,
}

impl FileStatus {
    /// The short tag used in serialized output and templates.
    pub fn as_tag(self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Removed => "removed",
            FileStatus::Modified => "mod",
            FileStatus::Copied => "cp",
            FileStatus::Moved => "mv",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// How change lines are escaped at construction time.
///
/// The default consumer is the HTML report renderer, so `Html` is the
/// default; callers with a different output format inject `Raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    #[default]
    Html,
    Raw,
}

impl Escaping {
    /// Apply this escaping to a line of text.
    pub fn apply(self, text: &str) -> String {
        match self {
            Escaping::Html => html_escape(text),
            Escaping::Raw => text.to_string(),
        }
    }
}

/// Escape `&`, `<`, and `>` for embedding in HTML element content.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// One line of diff content attributed to one file.
///
/// Immutable after construction; `line` is escaped exactly once, when the
/// change is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    /// The line's text content, marker stripped, escaped at construction.
    pub line: String,
    /// The line's role in the diff.
    #[serde(rename = "type")]
    pub kind: ChangeKind,
}

impl Change {
    pub(super) fn new(text: &str, kind: ChangeKind, escaping: Escaping) -> Self {
        Self {
            line: escaping.apply(text),
            kind,
        }
    }
}

/// One file entry within a diff.
///
/// Created the moment an `Index:` line is scanned and mutated in place as
/// subsequent lines are attributed to it; the classifier sets the terminal
/// `status` after scanning completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiff {
    /// Repository-relative path, taken verbatim from the `Index:` line.
    pub path: String,
    /// Base URL joined with `path`, for linking in the rendered report.
    pub url: String,
    /// Terminal change status; provisionally `Modified` until classified.
    #[serde(rename = "type")]
    pub status: FileStatus,
    /// Revision the file was changed from; 0 means the file did not
    /// previously exist.
    pub rev_from: u64,
    /// Revision the file was changed to; 0 when the marker carried none.
    pub rev_to: u64,
    /// Changes in order of appearance in the diff.
    pub changes: Vec<Change>,
}

impl FileDiff {
    /// A fresh file record for `path`, with its own empty change list.
    ///
    /// `base_url` must already have any trailing slash stripped.
    pub(super) fn new(path: &str, base_url: &str) -> Self {
        Self {
            path: path.to_string(),
            url: format!("{}/{}", base_url, path),
            status: FileStatus::Modified,
            rev_from: 0,
            rev_to: 0,
            changes: Vec::new(),
        }
    }

    /// Changes that participate in status classification (everything but
    /// `Info` lines).
    pub fn counted_changes(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(|c| c.kind.is_counted())
    }
}

impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File {} ({})", self.path, self.status)
    }
}
