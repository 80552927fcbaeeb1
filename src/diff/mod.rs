//! Parsing of `svn diff` output into per-file change records.
//!
//! This module turns the raw unified-diff text produced by the Subversion
//! client into an ordered list of [`FileDiff`] records suitable for the
//! report renderer:
//! - a single-pass line scanner classifies each line by its structural role
//!   (`Index:` marker, separator, revision markers, hunk headers, content)
//! - a builder attributes content lines to the most recently started file
//!   and extracts revision bounds from the `---`/`+++` marker lines
//! - a classifier assigns each file a terminal status (added, removed,
//!   modified) once scanning completes
//!
//! The parser is deliberately lenient: unrecognized input (for example
//! property-change sections preceding any file) is reported through a
//! diagnostics sink and skipped, never a parse failure.

mod classify;
mod model;
mod parser;
mod scanner;


// Re-export public API
pub use model::{html_escape, Change, ChangeKind, Escaping, FileDiff, FileStatus};
pub use parser::{parse, parse_with, LogDiagnostics, ParseDiagnostics};
