//! Commit report rendering.
//!
//! Builds the template context for one revision and renders it to HTML.
//! The context is a plain JSON value so the template's dotted-path
//! expressions (`${file.path}`, `${change.line}`) resolve with simple
//! key lookups.

use crate::diff::{html_escape, FileDiff};
use crate::error::{Result, SvnwatchError};
use crate::svn::LogEntry;
use crate::template;
use serde_json::{json, Value};
use std::path::Path;

/// Built-in report template, used unless the config points elsewhere.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/simple.html");

/// Load the report template from `path`, or the built-in one when unset.
pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        None => Ok(DEFAULT_TEMPLATE.to_string()),
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            SvnwatchError::ConfigError(format!(
                "cannot read template file '{}': {}",
                path.display(),
                e
            ))
        }),
    }
}

/// Render the HTML report for one revision.
pub fn render_report(
    template: &str,
    module: &str,
    revision: u64,
    log: &LogEntry,
    diff: &str,
    files: &[FileDiff],
) -> String {
    template::render(template, &build_context(module, revision, log, diff, files))
}

/// Template context for one revision.
///
/// The commit message and raw diff are HTML-escaped here; change lines
/// inside `files` are already escaped by the parser.
pub fn build_context(
    module: &str,
    revision: u64,
    log: &LogEntry,
    diff: &str,
    files: &[FileDiff],
) -> Value {
    json!({
        "module": module,
        "revision": revision,
        "author": log.author,
        "author_name": log.author_name,
        "timestamp": log.timestamp,
        "message": html_escape(&log.message),
        "diff": html_escape(diff),
        "files": files_value(files),
    })
}

fn files_value(files: &[FileDiff]) -> Value {
    Value::Array(files.iter().map(file_value).collect())
}

/// Serialize one file, adding a per-change boolean named after the change
/// kind (`added`, `removed`, `unmod`, `info`) so templates can branch with
/// `#if(change.added)`.
fn file_value(file: &FileDiff) -> Value {
    let mut value = serde_json::to_value(file).unwrap_or(Value::Null);

    if let Some(changes) = value.get_mut("changes").and_then(Value::as_array_mut) {
        for (rendered, change) in changes.iter_mut().zip(&file.changes) {
            if let Value::Object(map) = rendered {
                map.insert(change.kind.as_tag().to_string(), Value::Bool(true));
            }
        }
    }

    value
}
