//! Error types for the svnwatch CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for svnwatch operations.
///
/// Each variant maps to a specific exit code so that shell wrappers and
/// service supervisors can distinguish failure classes.
#[derive(Error, Debug)]
pub enum SvnwatchError {
    /// User provided invalid arguments or an unreadable input file.
    #[error("{0}")]
    UserError(String),

    /// Configuration file is missing, unparsable, or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Subversion operation failed.
    #[error("Subversion operation failed: {0}")]
    SvnError(String),

    /// Report delivery failed (mail transport or diff file write).
    #[error("Delivery failed: {0}")]
    NotifyError(String),
}

impl SvnwatchError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SvnwatchError::UserError(_) => exit_codes::USER_ERROR,
            SvnwatchError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            SvnwatchError::SvnError(_) => exit_codes::SVN_FAILURE,
            SvnwatchError::NotifyError(_) => exit_codes::NOTIFY_FAILURE,
        }
    }
}

/// Result type alias for svnwatch operations.
pub type Result<T> = std::result::Result<T, SvnwatchError>;
