//! Exit code constants for the svnwatch CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input)
//! - 2: Configuration error
//! - 3: Subversion operation failure
//! - 4: Delivery failure (mail or diff file)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or unreadable input.
pub const USER_ERROR: i32 = 1;

/// Configuration error: missing, unparsable, or invalid config file.
pub const CONFIG_FAILURE: i32 = 2;

/// Subversion operation failure: svn info, log, or diff errors.
pub const SVN_FAILURE: i32 = 3;

/// Delivery failure: sendmail invocation or diff file write errors.
pub const NOTIFY_FAILURE: i32 = 4;
