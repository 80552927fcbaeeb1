//! Configuration model for svnwatch.
//!
//! This module defines the Config struct that represents
//! `~/.svnwatch/config.yaml`. It supports forward-compatible YAML parsing
//! (unknown fields are preserved), sensible defaults for optional fields,
//! and validation of config values.
//!
//! # File Format
//!
//! ```yaml
//! defaults:
//!   interval_minutes: 10
//!   subscribers: [dev@example.com]
//!   from_domain: example.com
//!   sendmail_command: sendmail -i -t
//!   max_diff_size: 262144
//!
//! modules:
//!   infra:
//!     repo: http://svn.example.com/repos/infra
//!     interval_minutes: 5
//!     subscribers: [infra-commits@example.com]
//!     author_names:
//!       jdoe: John Doe
//!   docs:
//!     repo: http://svn.example.com/repos/docs
//!     diff_dir: /var/spool/svnwatch
//!     group_by_date: true
//! ```
//!
//! Per-module values override the defaults; a module with `diff_dir` set
//! writes diff files instead of sending mail.

use crate::error::{Result, SvnwatchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default check interval in minutes.
const DEFAULT_INTERVAL_MINUTES: u64 = 10;

/// Default mail transport command.
const DEFAULT_SENDMAIL_COMMAND: &str = "sendmail -i -t";

fn default_interval_minutes() -> u64 {
    DEFAULT_INTERVAL_MINUTES
}

fn default_sendmail_command() -> String {
    DEFAULT_SENDMAIL_COMMAND.to_string()
}

fn default_from_domain() -> String {
    "localhost".to_string()
}

/// Configuration for the svnwatch daemon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings applied to every module unless overridden.
    pub defaults: Defaults,

    /// Watched repository modules keyed by name.
    pub modules: BTreeMap<String, ModuleConfig>,
}

/// Default settings shared by all modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Minutes between checks of a module.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    /// Recipients of commit notifications.
    pub subscribers: Vec<String>,

    /// Domain appended to the commit author to form the From address.
    #[serde(default = "default_from_domain")]
    pub from_domain: String,

    /// Sendmail-compatible command the rendered message is piped to.
    #[serde(default = "default_sendmail_command")]
    pub sendmail_command: String,

    /// Diffs longer than this many bytes are truncated before rendering.
    pub max_diff_size: Option<usize>,

    /// Report template; the built-in template is used when unset.
    pub template_file: Option<PathBuf>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            subscribers: Vec::new(),
            from_domain: default_from_domain(),
            sendmail_command: default_sendmail_command(),
            max_diff_size: None,
            template_file: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Configuration for one watched module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// URL of the Subversion repository (required).
    pub repo: String,

    /// Override of the default check interval.
    pub interval_minutes: Option<u64>,

    /// Override of the default subscriber list.
    pub subscribers: Option<Vec<String>>,

    /// When set, diffs are written to this directory instead of mailed.
    pub diff_dir: Option<PathBuf>,

    /// Group diff files into per-date subdirectories of `diff_dir`.
    pub group_by_date: bool,

    /// Maps repository account names to display names for the report.
    pub author_names: BTreeMap<String, String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Effective settings for one module, defaults merged with overrides.
#[derive(Debug, Clone)]
pub struct ModuleSettings {
    pub name: String,
    pub repo: String,
    pub interval_minutes: u64,
    pub subscribers: Vec<String>,
    pub from_domain: String,
    pub sendmail_command: String,
    pub max_diff_size: Option<usize>,
    pub template_file: Option<PathBuf>,
    pub diff_dir: Option<PathBuf>,
    pub group_by_date: bool,
    pub author_names: BTreeMap<String, String>,
}

impl ModuleSettings {
    /// Display name for a commit author, honoring the configured mapping.
    pub fn author_display_name<'a>(&'a self, author: &'a str) -> &'a str {
        self.author_names
            .get(author)
            .map(String::as_str)
            .unwrap_or(author)
    }
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SvnwatchError::ConfigError(format!(
                "cannot read config file '{}': {}\n\
                 Create it with at least one module under 'modules:'.",
                path.display(),
                e
            ))
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            SvnwatchError::ConfigError(format!("invalid config file '{}': {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values, returning a descriptive error on problems.
    pub fn validate(&self) -> Result<()> {
        if self.modules.is_empty() {
            return Err(SvnwatchError::ConfigError(
                "no modules defined; add at least one entry under 'modules:'".to_string(),
            ));
        }

        if self.defaults.interval_minutes == 0 {
            return Err(SvnwatchError::ConfigError(
                "defaults.interval_minutes must be at least 1".to_string(),
            ));
        }

        for (name, module) in &self.modules {
            if module.repo.trim().is_empty() {
                return Err(SvnwatchError::ConfigError(format!(
                    "module '{}' has no repo URL",
                    name
                )));
            }
            if module.interval_minutes == Some(0) {
                return Err(SvnwatchError::ConfigError(format!(
                    "module '{}': interval_minutes must be at least 1",
                    name
                )));
            }
            if module.diff_dir.is_none()
                && module
                    .subscribers
                    .as_ref()
                    .unwrap_or(&self.defaults.subscribers)
                    .is_empty()
            {
                return Err(SvnwatchError::ConfigError(format!(
                    "module '{}' has no subscribers and no diff_dir; \
                     notifications would go nowhere",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Names of all configured modules, in stable order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// Effective settings for `name`, or an error for unknown modules.
    pub fn module_settings(&self, name: &str) -> Result<ModuleSettings> {
        let module = self.modules.get(name).ok_or_else(|| {
            SvnwatchError::UserError(format!(
                "unknown module '{}'. Configured modules: {}",
                name,
                self.module_names().join(", ")
            ))
        })?;

        Ok(ModuleSettings {
            name: name.to_string(),
            repo: module.repo.clone(),
            interval_minutes: module
                .interval_minutes
                .unwrap_or(self.defaults.interval_minutes),
            subscribers: module
                .subscribers
                .clone()
                .unwrap_or_else(|| self.defaults.subscribers.clone()),
            from_domain: self.defaults.from_domain.clone(),
            sendmail_command: self.defaults.sendmail_command.clone(),
            max_diff_size: self.defaults.max_diff_size,
            template_file: self.defaults.template_file.clone(),
            diff_dir: module.diff_dir.clone(),
            group_by_date: module.group_by_date,
            author_names: module.author_names.clone(),
        })
    }
}
