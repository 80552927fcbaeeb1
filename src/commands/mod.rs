//! Command implementations for svnwatch.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod check;
mod parse_cmd;
mod run;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Check(args) => check::cmd_check(args),
        Command::Parse(args) => parse_cmd::cmd_parse(args),
    }
}
