// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for prbump.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. prbump.toml (repository root, optional)
//! 3. --config FILE (repeatable)
//! 4. PRBUMP_* env vars
//! 5. --set KEY=VALUE
//! 6. dedicated CLI flags (--main-branch, --push, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PRBUMP_GIT__MAIN_BRANCH=develop   → git.main_branch = "develop"
//! PRBUMP_GIT__PUSH=true             → git.push = true
//! PRBUMP_UPDATE__MATCH_MODE=whole-token
//! ```
//!
//! # Example
//!
//! ```toml
//! [git]
//! main_branch = "develop"
//! remote = "upstream"
//!
//! [update]
//! commit_message = "chore: bump {old} to {new} ({branch})"
//! exclude = ["**/*.lock", "CHANGELOG.md"]
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig, UpdateConfig};

/// Name of the optional per-repository config file.
pub const CONFIG_FILE_NAME: &str = "prbump.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git settings.
    pub git: GitConfig,
    /// File update settings.
    pub update: UpdateConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use prbump::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("prbump.toml")
    ///     .with_env_prefix("PRBUMP")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that deserialize fine but cannot work at run time.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for empty branch/remote names,
    /// an empty commit message, or an exclude pattern that is not a valid glob.
    pub fn validate(&self) -> Result<()> {
        if self.git.main_branch.trim().is_empty() {
            return Err(invalid("git", "main_branch", "must not be empty").into());
        }
        if self.git.remote.trim().is_empty() {
            return Err(invalid("git", "remote", "must not be empty").into());
        }
        if self.update.commit_message.trim().is_empty() {
            return Err(invalid("update", "commit_message", "must not be empty").into());
        }
        for pattern in &self.update.exclude {
            if let Err(e) = wax::Glob::new(pattern) {
                return Err(invalid("update", "exclude", &format!("'{pattern}': {e}")).into());
            }
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".to_string(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(|| "(none)".to_string(), |p| p.display().to_string()),
        );
        options.insert("git.main_branch".to_string(), self.git.main_branch.clone());
        options.insert("git.remote".to_string(), self.git.remote.clone());
        options.insert("git.push".to_string(), self.git.push.to_string());
        options.insert(
            "update.commit_message".to_string(),
            self.update.commit_message.clone(),
        );
        options.insert("update.exclude".to_string(), self.update.exclude.join(", "));
        options.insert(
            "update.match_mode".to_string(),
            self.update.match_mode.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
