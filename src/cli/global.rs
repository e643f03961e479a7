// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! -C/--repo DIR       ← Work tree to operate on (default: current dir)
//! --config FILE       ← Additional config files (can repeat)
//! --no-repo-config    ← Skip <repo root>/prbump.toml
//! --log-level N       ← Console verbosity (0-6)
//! --file-log-level    ← File verbosity (overrides --log-level)
//! --log-file FILE     ← Also log to FILE
//! --set KEY=VAL       ← Direct config override
//!
//! Precedence: command flags > --set > PRBUMP_* > --config > prbump.toml > defaults
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Run as if started in DIR.
    #[arg(short = 'C', long = "repo", value_name = "DIR", global = true)]
    pub repo: Option<PathBuf>,

    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        action = clap::ArgAction::Append,
        global = true
    )]
    pub configs: Vec<PathBuf>,

    /// Do not load prbump.toml from the repository root.
    #[arg(long = "no-repo-config", global = true)]
    pub no_repo_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=6),
        global = true
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(
        long = "file-log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=6),
        global = true
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Sets an option, such as 'git.remote=upstream' or 'update.match_mode=whole-token'.
    /// Can be specified multiple times.
    #[arg(
        short = 's',
        long = "set",
        value_name = "OPTION",
        action = clap::ArgAction::Append,
        global = true
    )]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// Directory the repository is discovered from.
    #[must_use]
    pub fn repo_dir(&self) -> &Path {
        self.repo.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Converts command-line options to `section.key=value` overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global.output_log_level={level}"));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global.file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global.log_file={}", path.display()));
        }

        overrides
    }
}
