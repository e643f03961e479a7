// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for prbump using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! prbump [global options] <command>
//!   update   bump a literal across branches
//!   options  print the effective configuration
//!   version
//! ```

pub mod global;
pub mod update;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::update::UpdateArgs;
use clap::{Parser, Subcommand};

/// PR Branch Version Bump Tool
///
/// Replaces a version literal in the files each branch changed, commits,
/// and rebases the branch onto main.
#[derive(Debug, Parser)]
#[command(
    name = "prbump",
    author,
    version,
    about = "PR Branch Version Bump Tool",
    long_about = "prbump Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  For every listed branch, prbump finds where it left main,\n\
                  replaces the old literal with the new one in the files the\n\
                  branch added or modified, commits, and rebases onto main.",
    after_help = "CONFIG FILES:\n\n\
                  prbump reads `prbump.toml` from the repository root unless\n\
                  --no-repo-config is given, then every --config file in order,\n\
                  then PRBUMP_* environment variables (PRBUMP_GIT__REMOTE=fork).\n\
                  --set and command flags override all of them."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Bumps a version literal across branches.
    Update(UpdateArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
