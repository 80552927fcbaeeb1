//! Per-line classification of diff text.
//!
//! The `svn diff` format is line-oriented and loosely structured; there is
//! no single grammar covering file markers, separators, hunk headers and
//! content. The scanner therefore classifies each line independently by
//! prefix, first match wins, and leaves all stateful decisions (which file
//! a line belongs to) to the parser.

/// Prefix that starts a new file section.
pub(super) const INDEX_PREFIX: &str = "Index: ";

/// Structural role of a single diff line.
///
/// `Content` covers every line that matches no structural prefix; whether
/// such a line is diff content or unrecognized preamble depends on parser
/// state, not on the line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineKind<'a> {
    /// `Index: <path>` marker starting a new file section.
    Index(&'a str),
    /// Separator line, a run of `=` characters.
    Separator,
    /// `---` marker carrying the old path and revision.
    OldMarker,
    /// `+++` marker carrying the new path and revision.
    NewMarker,
    /// `@@ ... @@` hunk header.
    HunkHeader,
    /// `\ No newline at end of file` marker.
    NoNewline,
    /// Anything else: hunk content or unrecognized preamble.
    Content,
}

/// Classify one line of diff text, first match wins.
pub(super) fn classify(line: &str) -> LineKind<'_> {
    if let Some(path) = line.strip_prefix(INDEX_PREFIX) {
        return LineKind::Index(path);
    }
    if !line.is_empty() && line.bytes().all(|b| b == b'=') {
        return LineKind::Separator;
    }
    if line.starts_with("---") {
        return LineKind::OldMarker;
    }
    if line.starts_with("+++") {
        return LineKind::NewMarker;
    }
    if line.starts_with("@@") {
        return LineKind::HunkHeader;
    }
    if line.starts_with('\\') {
        return LineKind::NoNewline;
    }
    LineKind::Content
}
