//! CLI argument parsing for svnwatch.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Svnwatch: watches Subversion repositories and mails rendered diff
/// reports to subscribers.
///
/// Modules (repositories to watch, check intervals, recipients) are
/// configured in `~/.svnwatch/config.yaml`; per-module state lives next to
/// it in `~/.svnwatch/last-revs/`.
#[derive(Parser, Debug)]
#[command(name = "svnwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Raise the default log level to debug.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for svnwatch.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Watch all configured modules.
    ///
    /// Starts one watcher per module, each checking for new revisions at
    /// the module's interval and delivering a report per revision.
    Run(RunArgs),

    /// Run a single check pass for one module.
    ///
    /// Useful for testing a module's configuration or catching up after
    /// downtime without starting the full watcher.
    Check(CheckArgs),

    /// Parse a diff and print the per-file summary.
    ///
    /// Reads `svn diff` output from a file or stdin and prints what the
    /// report would contain, without touching any repository.
    Parse(ParseArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the config file (default: ~/.svnwatch/config.yaml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Check every module once and exit instead of looping.
    #[arg(long)]
    pub once: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Name of the configured module to check.
    pub module: String,

    /// Path to the config file (default: ~/.svnwatch/config.yaml).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `parse` command.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Diff file to parse, or `-` for stdin.
    #[arg(default_value = "-")]
    pub file: String,

    /// Base URL prefixed to file paths to form links.
    #[arg(long, default_value = "http://localhost")]
    pub base_url: String,

    /// Print the full parsed records as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,

    /// Leave change lines unescaped instead of HTML-escaping them.
    #[arg(long)]
    pub raw: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::try_parse_from(["svnwatch", "run"]).unwrap();
        assert!(!cli.debug);
        if let Command::Run(args) = cli.command {
            assert!(args.config.is_none());
            assert!(!args.once);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_with_options() {
        let cli = Cli::try_parse_from([
            "svnwatch",
            "run",
            "--config",
            "/etc/svnwatch.yaml",
            "--once",
        ])
        .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("/etc/svnwatch.yaml")));
            assert!(args.once);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["svnwatch", "check", "infra"]).unwrap();
        if let Command::Check(args) = cli.command {
            assert_eq!(args.module, "infra");
            assert!(args.config.is_none());
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn parse_check_requires_module() {
        assert!(Cli::try_parse_from(["svnwatch", "check"]).is_err());
    }

    #[test]
    fn parse_parse_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["svnwatch", "parse"]).unwrap();
        if let Command::Parse(args) = cli.command {
            assert_eq!(args.file, "-");
            assert_eq!(args.base_url, "http://localhost");
            assert!(!args.json);
            assert!(!args.raw);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn parse_parse_full() {
        let cli = Cli::try_parse_from([
            "svnwatch",
            "parse",
            "r3417.diff",
            "--base-url",
            "http://svn.example.com/repos",
            "--json",
        ])
        .unwrap();
        if let Command::Parse(args) = cli.command {
            assert_eq!(args.file, "r3417.diff");
            assert_eq!(args.base_url, "http://svn.example.com/repos");
            assert!(args.json);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn debug_flag_is_global() {
        let cli = Cli::try_parse_from(["svnwatch", "check", "infra", "--debug"]).unwrap();
        assert!(cli.debug);
    }
}
