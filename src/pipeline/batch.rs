// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sequential batch over a list of branches.
//!
//! ```text
//! ensure_clean (real runs refuse a dirty work tree)
//!      |
//! [a, b, a, c] --dedupe--> [a, b, c]
//!      |
//!      v
//! remember current branch
//!      |
//!      v
//! for each: BranchPipeline::run --> BranchOutcome (Done | Aborted)
//!      |
//!      v
//! restore current branch (real runs only)
//!      |
//!      v
//! BatchReport  "2/3 branches processed successfully"
//! ```

use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::error::{BumpResult, GitError};
use crate::git::Gateway;
use crate::update::ScopedFileUpdater;

use super::{BranchOutcome, BranchPipeline, PipelineOptions};

/// Outcome of a whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub dry_run: bool,
    pub total: usize,
    pub succeeded: usize,
    pub branches: Vec<BranchOutcome>,
}

impl BatchReport {
    /// `"<succeeded>/<total> branches processed successfully"`.
    #[must_use]
    pub fn tally(&self) -> String {
        format!(
            "{}/{} branches processed successfully",
            self.succeeded, self.total
        )
    }

    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }

    pub fn failed(&self) -> impl Iterator<Item = &BranchOutcome> {
        self.branches.iter().filter(|outcome| !outcome.is_done())
    }
}

/// Drop repeated names, keeping the first occurrence in place.
#[must_use]
pub fn dedupe_branches(branches: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(branches.len());
    for branch in branches {
        if seen.insert(branch.as_str()) {
            unique.push(branch.as_str());
        } else {
            warn!(branch = %branch, "branch listed more than once, processing it once");
        }
    }
    unique
}

/// Runs [`BranchPipeline`] over every branch, tolerating per-branch failure.
pub struct BatchDriver<'a, 'u, G: Gateway + ?Sized> {
    gateway: &'a mut G,
    options: &'a PipelineOptions,
    updater: &'a ScopedFileUpdater<'u>,
}

impl<'a, 'u, G: Gateway + ?Sized> BatchDriver<'a, 'u, G> {
    pub const fn new(
        gateway: &'a mut G,
        options: &'a PipelineOptions,
        updater: &'a ScopedFileUpdater<'u>,
    ) -> Self {
        Self {
            gateway,
            options,
            updater,
        }
    }

    /// Refuse to start a real run over uncommitted edits to tracked files.
    ///
    /// Dry runs never touch the work tree and are always allowed.
    ///
    /// # Errors
    ///
    /// Returns `GitError::UncommittedChanges` for a dirty work tree, or the
    /// error of the status check itself.
    pub fn ensure_clean(&self) -> BumpResult<()> {
        if self.options.dry_run() || !self.gateway.is_dirty()? {
            return Ok(());
        }
        Err(GitError::UncommittedChanges {
            path: self.gateway.repo_root().display().to_string(),
        }
        .into())
    }

    pub fn run(&mut self, branches: &[String]) -> BatchReport {
        let branches = dedupe_branches(branches);
        let original = match self.gateway.current_branch() {
            Ok(branch) => branch,
            Err(e) => {
                warn!(error = %e, "could not read current branch, it will not be restored");
                None
            }
        };

        info!(
            count = branches.len(),
            dry_run = self.options.dry_run(),
            "processing branches"
        );

        let mut outcomes = Vec::with_capacity(branches.len());
        for (i, branch) in branches.iter().enumerate() {
            info!(branch, "[{}/{}] processing", i + 1, branches.len());
            let outcome =
                BranchPipeline::new(&mut *self.gateway, self.options, self.updater).run(branch);
            outcomes.push(outcome);
        }

        if !self.options.dry_run()
            && let Some(original) = original
        {
            self.restore(&original);
        }

        let succeeded = outcomes.iter().filter(|outcome| outcome.is_done()).count();
        let report = BatchReport {
            dry_run: self.options.dry_run(),
            total: outcomes.len(),
            succeeded,
            branches: outcomes,
        };
        for failed in report.failed() {
            if let Some(reason) = failed.abort_reason() {
                warn!(branch = %failed.branch, ?reason, "branch needs attention");
            }
        }
        info!("{}", report.tally());
        report
    }

    fn restore(&mut self, original: &str) {
        match self.gateway.current_branch() {
            Ok(Some(current)) if current == original => return,
            Ok(_) => {}
            Err(e) => warn!(error = %e, "could not read current branch"),
        }
        match self.gateway.checkout(original) {
            Ok(()) => info!(branch = original, "restored original branch"),
            Err(e) => warn!(branch = original, error = %e, "failed to restore original branch"),
        }
    }
}
