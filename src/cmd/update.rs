// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `update` command.
//!
//! ```text
//! UpdateArgs + Config
//!   --> branch list (--branches | --branches-file)
//!   --> Substitution, ExcludeSet, ScopedFileUpdater
//!   --> GitGateway::open (git in PATH, work tree, lock)
//!   --> BatchDriver::run --> tally line | JSON report
//! ```

use anyhow::Context;
use std::path::Path;
use tracing::info;

use crate::cli::update::UpdateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::{Gateway, GitGateway};
use crate::pipeline::branches::{load_branches, validate_branches};
use crate::pipeline::{BatchDriver, BatchReport, PipelineOptions};
use crate::update::{ExcludeSet, ScopedFileUpdater, Substitution};

/// Branch names from whichever source was given.
///
/// # Errors
///
/// Returns an error if the list file is unreadable or the list is invalid.
pub fn collect_branches(args: &UpdateArgs) -> Result<Vec<String>> {
    match &args.branches_file {
        Some(path) => load_branches(path),
        None => validate_branches(args.branches.clone()),
    }
}

/// Run the update over every requested branch.
///
/// Setup problems (bad arguments, no repository, locked or dirty work tree)
/// are errors; per-branch failures are part of the returned report.
///
/// # Errors
///
/// Returns an error if the batch cannot start.
pub fn run_update_command(args: &UpdateArgs, config: &Config, repo: &Path) -> Result<BatchReport> {
    let branches = collect_branches(args)?;
    let substitution = Substitution::new(args.old_value.as_str(), args.new_value.as_str())
        .context("invalid --old-value")?;

    let patterns: Vec<String> = config
        .update
        .exclude
        .iter()
        .chain(&args.exclude)
        .cloned()
        .collect();
    let exclude = ExcludeSet::new(&patterns)?;
    let updater = ScopedFileUpdater::new(&substitution, config.update.match_mode, exclude);
    let options = PipelineOptions::from_config(config, args.dry_run);

    let mut gateway = GitGateway::open(repo)
        .with_context(|| format!("cannot operate on {}", repo.display()))?;
    info!(
        root = %gateway.repo_root().display(),
        old = substitution.old(),
        new = substitution.new_value(),
        main = %options.main_ref(),
        mode = %config.update.match_mode,
        "starting batch"
    );

    let mut driver = BatchDriver::new(&mut gateway, &options, &updater);
    driver.ensure_clean()?;
    let report = driver.run(&branches);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    } else {
        println!("{}", report.tally());
    }
    Ok(report)
}
