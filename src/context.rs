//! Application directory resolution for svnwatch.
//!
//! All persistent state lives under a single application directory,
//! `~/.svnwatch` by default:
//! - `config.yaml` - the daemon configuration
//! - `last-revs/<module>` - per-module checkpoint files
//!
//! The `SVNWATCH_HOME` environment variable overrides the location, which
//! also keeps tests away from the real home directory.

use crate::error::{Result, SvnwatchError};
use std::env;
use std::path::{Path, PathBuf};

/// Directory name under the home directory.
const APP_DIR_NAME: &str = ".svnwatch";

/// Environment variable overriding the application directory.
const HOME_OVERRIDE_VAR: &str = "SVNWATCH_HOME";

/// Resolved paths for svnwatch state.
#[derive(Debug, Clone)]
pub struct AppDirs {
    /// The application directory itself.
    pub root: PathBuf,

    /// Path of the configuration file.
    pub config_file: PathBuf,

    /// Directory holding per-module checkpoint files.
    pub last_revs_dir: PathBuf,
}

impl AppDirs {
    /// Resolve the application directories, honoring `SVNWATCH_HOME` and an
    /// optional config-file override from the command line.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self> {
        let root = match env::var_os(HOME_OVERRIDE_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .ok_or_else(|| {
                    SvnwatchError::UserError(
                        "cannot determine home directory; set SVNWATCH_HOME".to_string(),
                    )
                })?
                .join(APP_DIR_NAME),
        };

        Ok(Self::in_root(root, config_override))
    }

    /// Build the directory layout under a known root.
    pub fn in_root(root: PathBuf, config_override: Option<&Path>) -> Self {
        let config_file = config_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join("config.yaml"));
        let last_revs_dir = root.join("last-revs");

        Self {
            root,
            config_file,
            last_revs_dir,
        }
    }
}
