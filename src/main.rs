//! Svnwatch: watches Subversion repositories and mails rendered diff
//! reports to subscribers.
//!
//! This is the main entry point for the `svnwatch` CLI. It parses
//! arguments, initializes logging, dispatches to the appropriate command
//! handler, and handles errors with proper exit codes.

mod checkpoint;
mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod notify;
pub mod report;
pub mod svn;
pub mod template;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    init_logging(cli.debug);

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Initialize the logger. `RUST_LOG` still wins over the `--debug` flag so
/// per-module filters keep working.
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .init();
}
