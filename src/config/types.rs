// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for prbump.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, GitConfig, UpdateConfig
//! ```
//!
//! # Match Mode
//!
//! ```text
//! MatchMode: Substring (default) | WholeToken
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default commit message. Placeholders: `{old}`, `{new}`, `{branch}`.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update {old} → {new} in {branch}";

/// How the old literal is located in file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Every occurrence, even inside a larger token (`1.2` in `11.23`).
    #[default]
    Substring,
    /// Only occurrences not glued to an alphanumeric, `_`, `.` or `-`.
    WholeToken,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::WholeToken => write!(f, "whole-token"),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::Info,
            file_log_level: LogLevel::Trace,
            log_file: None,
        }
    }
}

/// Git-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Branch every feature branch is rebased onto.
    pub main_branch: String,
    /// Remote used for fetch, tracking branches and push.
    pub remote: String,
    /// Force-push (with lease) each branch after the rebase.
    pub push: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            main_branch: "main".to_string(),
            remote: "origin".to_string(),
            push: false,
        }
    }
}

/// File update settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateConfig {
    /// Commit message template.
    pub commit_message: String,
    /// Glob patterns removed from every change set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Literal matching policy.
    pub match_mode: MatchMode,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            exclude: Vec::new(),
            match_mode: MatchMode::default(),
        }
    }
}
