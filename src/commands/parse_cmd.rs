//! Implementation of the `parse` command.
//!
//! Parses a diff from a file (or stdin) and prints the per-file summary,
//! or the full JSON records with `--json`. This is the debugging surface
//! for the diff parser; it never touches the repository or the config.

use crate::cli::ParseArgs;
use crate::diff::{self, ChangeKind, Escaping, FileDiff, LogDiagnostics};
use crate::error::{Result, SvnwatchError};
use std::io::Read;

pub fn cmd_parse(args: ParseArgs) -> Result<()> {
    let diff_text = read_input(&args.file)?;
    let escaping = if args.raw { Escaping::Raw } else { Escaping::Html };
    let files = diff::parse_with(&diff_text, &args.base_url, escaping, &mut LogDiagnostics);

    if args.json {
        let json = serde_json::to_string_pretty(&files).map_err(|e| {
            SvnwatchError::UserError(format!("failed to serialize parse result: {}", e))
        })?;
        println!("{}", json);
    } else {
        for file in &files {
            println!("{}", summary_line(file));
        }
        println!("{} file(s)", files.len());
    }

    Ok(())
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| SvnwatchError::UserError(format!("failed to read stdin: {}", e)))?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(file)
            .map_err(|e| SvnwatchError::UserError(format!("cannot read '{}': {}", file, e)))
    }
}

fn summary_line(file: &FileDiff) -> String {
    let added = file
        .counted_changes()
        .filter(|c| c.kind == ChangeKind::Added)
        .count();
    let removed = file
        .counted_changes()
        .filter(|c| c.kind == ChangeKind::Removed)
        .count();

    format!(
        "{} r{}:r{} +{} -{}",
        file, file.rev_from, file.rev_to, added, removed
    )
}
