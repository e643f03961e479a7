// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-branch processing pipeline.
//!
//! ```text
//! Resolve --> Diff --> Update --> Commit --> Rebase --> Push --> Done
//!               |                (skipped when      (only with
//!               |                 nothing changed)   push enabled)
//!               `-- empty change set ------------------------> Done
//!
//! any stage --error--> Aborted { stage, reason, message }
//! ```
//!
//! | stage   | real run                                 | dry run                   |
//! |---------|------------------------------------------|---------------------------|
//! | Resolve | fetch, checkout (or track remote branch) | resolve head, no checkout |
//! | Diff    | merge-base `<remote>/<main>`, diff AM    | same                      |
//! | Update  | rewrite work tree files                  | read head commit, log     |
//! | Commit  | stage, commit (discard edits on failure) | log message               |
//! | Rebase  | fetch main, rebase (abort on conflict)   | log                       |
//! | Push    | `--force-with-lease` (only with push)    | log                       |
//!
//! A failing file never aborts a branch; a failing stage aborts only its
//! branch.

pub mod batch;
pub mod branches;
pub mod divergence;

#[cfg(test)]
mod test_utils;

pub use batch::{BatchDriver, BatchReport};

use bon::Builder;
use serde::Serialize;
use tracing::{debug, error, info, info_span, warn};

use crate::config::Config;
use crate::config::types::DEFAULT_COMMIT_MESSAGE;
use crate::error::{BumpError, BumpResult, GitError};
use crate::git::Gateway;
use crate::update::{ChangeSet, CommitSnapshot, ScopedFileUpdater, UpdateReport, WorkTreeFiles};

/// Pipeline states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Resolve,
    Diff,
    Update,
    Commit,
    Rebase,
    Push,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Resolve => "resolve",
            Self::Diff => "diff",
            Self::Update => "update",
            Self::Commit => "commit",
            Self::Rebase => "rebase",
            Self::Push => "push",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Why a branch was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbortReason {
    BranchNotFound,
    CheckoutFailed,
    DivergenceNotFound,
    CommitFailed,
    RebaseConflict,
    PushRejected,
    /// Any other git failure.
    Git,
    /// Anything that is not a git failure.
    Other,
}

impl AbortReason {
    #[must_use]
    pub fn classify(err: &BumpError) -> Self {
        match err.as_git() {
            Some(GitError::BranchNotFound { .. }) => Self::BranchNotFound,
            Some(GitError::CheckoutFailed { .. }) => Self::CheckoutFailed,
            Some(GitError::DivergenceNotFound { .. }) => Self::DivergenceNotFound,
            Some(GitError::CommitFailed { .. }) => Self::CommitFailed,
            Some(GitError::RebaseConflict { .. }) => Self::RebaseConflict,
            Some(GitError::PushRejected { .. }) => Self::PushRejected,
            Some(_) => Self::Git,
            None => Self::Other,
        }
    }
}

/// Terminal state of one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum BranchStatus {
    Done,
    Aborted {
        stage: Stage,
        reason: AbortReason,
        message: String,
    },
}

/// Everything recorded while processing one branch.
#[derive(Debug, Clone, Serialize)]
pub struct BranchOutcome {
    pub branch: String,
    #[serde(flatten)]
    pub status: BranchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_base: Option<String>,
    pub changed_files: ChangeSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<UpdateReport>,
    pub committed: bool,
    pub rebased: bool,
    pub pushed: bool,
}

impl BranchOutcome {
    fn new(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            status: BranchStatus::Done,
            head: None,
            merge_base: None,
            changed_files: ChangeSet::default(),
            update: None,
            committed: false,
            rebased: false,
            pushed: false,
        }
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.status, BranchStatus::Done)
    }

    /// Abort reason, `None` for a finished branch.
    #[must_use]
    pub const fn abort_reason(&self) -> Option<AbortReason> {
        match self.status {
            BranchStatus::Done => None,
            BranchStatus::Aborted { reason, .. } => Some(reason),
        }
    }
}

/// Settings shared by every branch of a batch.
#[derive(Debug, Clone, Builder)]
pub struct PipelineOptions {
    #[builder(setters(name = with_main_branch), default = "main".to_string())]
    main_branch: String,
    #[builder(setters(name = with_remote), default = "origin".to_string())]
    remote: String,
    #[builder(setters(name = with_push), default = false)]
    push: bool,
    #[builder(setters(name = with_dry_run), default = false)]
    dry_run: bool,
    #[builder(setters(name = with_commit_message), default = DEFAULT_COMMIT_MESSAGE.to_string())]
    commit_message: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PipelineOptions {
    /// Options from the effective configuration.
    #[must_use]
    pub fn from_config(config: &Config, dry_run: bool) -> Self {
        Self::builder()
            .with_main_branch(config.git.main_branch.clone())
            .with_remote(config.git.remote.clone())
            .with_push(config.git.push)
            .with_dry_run(dry_run)
            .with_commit_message(config.update.commit_message.clone())
            .build()
    }

    #[must_use]
    pub fn main_branch(&self) -> &str {
        &self.main_branch
    }

    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    #[must_use]
    pub const fn push(&self) -> bool {
        self.push
    }

    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    /// Remote-tracking ref every branch is compared with and rebased onto.
    #[must_use]
    pub fn main_ref(&self) -> String {
        format!("{}/{}", self.remote, self.main_branch)
    }
}

struct StageError {
    stage: Stage,
    error: BumpError,
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, StageError>;
}

impl<T> AtStage<T> for BumpResult<T> {
    fn at(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|error| StageError { stage, error })
    }
}

/// Runs the stages for one branch against a gateway.
pub struct BranchPipeline<'a, 'u, G: Gateway + ?Sized> {
    gateway: &'a mut G,
    options: &'a PipelineOptions,
    updater: &'a ScopedFileUpdater<'u>,
}

impl<'a, 'u, G: Gateway + ?Sized> BranchPipeline<'a, 'u, G> {
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

    /// Process `branch`. Never fails: errors end up in the outcome.
    pub fn run(&mut self, branch: &str) -> BranchOutcome {
        let _span = info_span!("branch", branch).entered();
        let mut outcome = BranchOutcome::new(branch);

        match self.drive(branch, &mut outcome) {
            Ok(()) => info!("done"),
            Err(StageError { stage, error: err }) => {
                let reason = AbortReason::classify(&err);
                error!(%stage, error = %err, "aborted");
                outcome.status = BranchStatus::Aborted {
                    stage,
                    reason,
                    message: err.to_string(),
                };
            }
        }
        outcome
    }

    fn drive(&mut self, branch: &str, outcome: &mut BranchOutcome) -> Result<(), StageError> {
        let options = self.options;
        let dry_run = options.dry_run();

        let (revision, head) = self.resolve(branch).at(Stage::Resolve)?;
        outcome.head = Some(head.clone());

        let main_ref = options.main_ref();
        let base =
            divergence::resolve_divergence(&*self.gateway, &main_ref, &revision).at(Stage::Diff)?;
        let changes = divergence::change_set(&*self.gateway, &base, &head).at(Stage::Diff)?;
        outcome.merge_base = Some(base);

        if changes.is_empty() {
            info!("no files changed since divergence, nothing to do");
            return Ok(());
        }
        info!(files = changes.len(), "files changed since divergence");
        debug!(files = ?changes, "change set");

        let report = if dry_run {
            let snapshot = CommitSnapshot::new(&*self.gateway, &head);
            self.updater.preview(&snapshot, &changes)
        } else {
            let mut store = WorkTreeFiles::new(self.gateway.repo_root());
            self.updater.apply(&mut store, &changes)
        };
        info!(
            updated = report.updated,
            unchanged = report.unchanged,
            skipped = report.skipped,
            errored = report.errored,
            "file update finished"
        );
        let updated = report.updated_paths.clone();
        outcome.changed_files = changes;
        outcome.update = Some(report);

        if updated.is_empty() {
            info!(old = self.updater.substitution().old(), "literal not found, nothing to commit");
        } else {
            let message = self
                .updater
                .substitution()
                .commit_message(options.commit_message(), branch);
            if dry_run {
                info!(%message, files = ?updated, "would commit");
            } else {
                self.commit(branch, &updated, &message).at(Stage::Commit)?;
                outcome.committed = true;
                info!(%message, files = updated.len(), "committed");
            }
        }

        if dry_run {
            info!(onto = %main_ref, "would rebase");
        } else {
            if let Err(e) = self.gateway.fetch(options.remote(), Some(options.main_branch())) {
                warn!(error = %e, "fetch of main failed, rebasing onto last fetched ref");
            }
            self.gateway.rebase(&main_ref).at(Stage::Rebase)?;
            outcome.rebased = true;
            info!(onto = %main_ref, "rebased");
        }

        if options.push() {
            if dry_run {
                info!(remote = options.remote(), "would force-push with lease");
            } else {
                self.gateway
                    .push_force_with_lease(options.remote(), branch)
                    .at(Stage::Push)?;
                outcome.pushed = true;
                info!(remote = options.remote(), "pushed");
            }
        }

        Ok(())
    }

    /// Revision naming the branch head, and the commit it points at.
    fn resolve(&mut self, branch: &str) -> BumpResult<(String, String)> {
        let remote = self.options.remote();
        let upstream = format!("{remote}/{branch}");
        let not_found = || -> BumpError {
            GitError::BranchNotFound {
                branch: branch.to_string(),
            }
            .into()
        };

        if self.options.dry_run() {
            let revision = if self.gateway.local_branch_exists(branch)? {
                branch.to_string()
            } else if self.gateway.remote_branch_exists(remote, branch)? {
                upstream
            } else {
                return Err(not_found());
            };
            let head = self.gateway.resolve_ref(&revision)?;
            info!(%revision, %head, "would check out");
            return Ok((revision, head));
        }

        if let Err(e) = self.gateway.fetch(remote, None) {
            warn!(remote, error = %e, "fetch failed, using last fetched refs");
        }
        if self.gateway.local_branch_exists(branch)? {
            self.gateway.checkout(branch)?;
        } else if self.gateway.remote_branch_exists(remote, branch)? {
            self.gateway.checkout_tracking(branch, &upstream)?;
        } else {
            return Err(not_found());
        }

        let head = self.gateway.resolve_ref("HEAD")?;
        info!(%head, "checked out");
        Ok((branch.to_string(), head))
    }

    /// Stage and commit `paths`. On failure the edits are discarded so the
    /// next branch can be checked out.
    fn commit(&mut self, branch: &str, paths: &[String], message: &str) -> BumpResult<()> {
        let result = self
            .gateway
            .stage(paths)
            .map_err(|e| {
                BumpError::from(GitError::CommitFailed {
                    branch: branch.to_string(),
                    message: e.to_string(),
                })
            })
            .and_then(|()| self.gateway.commit(branch, message));

        if result.is_err() {
            match self.gateway.discard(paths) {
                Ok(()) => debug!(files = ?paths, "discarded uncommitted edits"),
                Err(e) => warn!(error = %e, files = ?paths, "failed to discard uncommitted edits"),
            }
        }
        result
    }
}
