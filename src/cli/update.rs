// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update command arguments.
//!
//! ```text
//! prbump update (--branches B... | --branches-file FILE)
//!               --old-value OLD --new-value NEW
//!               [--main-branch main] [--remote origin]
//!               [--push] [--dry-run] [--exclude GLOB]... [--whole-token] [--json]
//! ```

use clap::{ArgGroup, Args};
use std::path::PathBuf;

/// Arguments for `prbump update`.
#[derive(Debug, Clone, Args)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["branches", "branches_file"])
))]
pub struct UpdateArgs {
    /// Branch names to process, in order.
    #[arg(long, value_name = "BRANCH", num_args = 1..)]
    pub branches: Vec<String>,

    /// JSON file with a list of branch names (or {"branches": [...]}).
    #[arg(long, value_name = "FILE")]
    pub branches_file: Option<PathBuf>,

    /// Literal to replace (e.g. 1.2).
    #[arg(long, value_name = "OLD", allow_hyphen_values = true)]
    pub old_value: String,

    /// Replacement literal (e.g. 1.3).
    #[arg(long, value_name = "NEW", allow_hyphen_values = true)]
    pub new_value: String,

    /// Branch every feature branch is diffed against and rebased onto.
    #[arg(long, value_name = "BRANCH")]
    pub main_branch: Option<String>,

    /// Remote to fetch from and push to.
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Force-push each branch with lease after the rebase.
    #[arg(long)]
    pub push: bool,

    /// Show what would be done without changing files, commits or remotes.
    #[arg(long)]
    pub dry_run: bool,

    /// Glob of paths never rewritten. Can be specified multiple times.
    #[arg(long = "exclude", value_name = "GLOB", action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Only replace the literal where it is not part of a longer token.
    #[arg(long)]
    pub whole_token: bool,

    /// Print the batch report as JSON instead of the tally line.
    #[arg(long)]
    pub json: bool,
}

impl UpdateArgs {
    /// Converts command flags to `section.key=value` overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();

        if let Some(ref branch) = self.main_branch {
            overrides.push(format!("git.main_branch={branch}"));
        }
        if let Some(ref remote) = self.remote {
            overrides.push(format!("git.remote={remote}"));
        }
        if self.push {
            overrides.push("git.push=true".to_string());
        }
        if self.whole_token {
            overrides.push("update.match_mode=whole-token".to_string());
        }

        overrides
    }
}
