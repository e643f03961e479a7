// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version control gateway used by the branch pipeline.
//!
//! ```text
//!   BranchPipeline
//!        |  &self (reads)          &mut self (writes)
//!        v                          v
//!   ,-----------------------------------------,
//!   | Gateway                                 |
//!   |  resolve_ref  merge_base  changed_files |
//!   |  read_file_at current_branch is_dirty   |
//!   |  fetch checkout stage commit discard    |
//!   |  rebase push                            |
//!   '--------------------+--------------------'
//!                        |
//!                        v
//!   GitGateway { root, WorkTreeLock }
//!        query.rs (gix)    cmd.rs (git CLI)
//! ```
//!
//! `GitGateway` owns the work tree for as long as it lives: it holds an
//! exclusive lock in the git directory and every mutating call needs
//! `&mut self`.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{BumpError, BumpResult, GitError, ProcessError};

use super::backend::TreeEntry;
use super::cmd;
use super::lock::WorkTreeLock;
use super::query;

/// Operations the pipeline needs from version control.
pub trait Gateway {
    /// Top-level directory of the work tree.
    fn repo_root(&self) -> &Path;

    /// Currently checked-out branch, `None` when HEAD is detached.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be read.
    fn current_branch(&self) -> BumpResult<Option<String>>;

    /// Whether `refs/heads/<branch>` exists.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the reference lookup fails.
    fn local_branch_exists(&self, branch: &str) -> BumpResult<bool>;

    /// Whether `refs/remotes/<remote>/<branch>` exists.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the reference lookup fails.
    fn remote_branch_exists(&self, remote: &str, branch: &str) -> BumpResult<bool>;

    /// Commit id a revision points at.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BranchNotFound` if it does not resolve.
    fn resolve_ref(&self, revision: &str) -> BumpResult<String>;

    /// Most recent common ancestor of `main` and `branch`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::DivergenceNotFound` when there is no common history.
    fn merge_base(&self, main: &str, branch: &str) -> BumpResult<String>;

    /// Paths added or modified between `base` and `head`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the diff cannot be computed.
    fn changed_files(&self, base: &str, head: &str) -> BumpResult<Vec<String>>;

    /// What `path` names at `commit`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the object cannot be read.
    fn read_file_at(&self, commit: &str, path: &str) -> BumpResult<TreeEntry>;

    /// Whether tracked files have uncommitted changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status cannot be computed.
    fn is_dirty(&self) -> BumpResult<bool>;

    /// Update remote-tracking refs, optionally for a single refspec.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the fetch fails.
    fn fetch(&mut self, remote: &str, refspec: Option<&str>) -> BumpResult<()>;

    /// Check out an existing local branch.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` on failure.
    fn checkout(&mut self, branch: &str) -> BumpResult<()>;

    /// Create `branch` tracking `upstream` and check it out.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` on failure.
    fn checkout_tracking(&mut self, branch: &str, upstream: &str) -> BumpResult<()>;

    /// Stage exactly `paths`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if staging fails.
    fn stage(&mut self, paths: &[String]) -> BumpResult<()>;

    /// Drop staged and work tree edits to `paths`, back to `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the paths cannot be restored.
    fn discard(&mut self, paths: &[String]) -> BumpResult<()>;

    /// Commit the index on the current branch.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommitFailed` on failure.
    fn commit(&mut self, branch: &str, message: &str) -> BumpResult<()>;

    /// Rebase the current branch onto `onto`, rolling back on conflict.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RebaseConflict` if the rebase stops.
    fn rebase(&mut self, onto: &str) -> BumpResult<()>;

    /// `push --force-with-lease <remote> <branch>`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::PushRejected` if the remote refuses the push.
    fn push_force_with_lease(&mut self, remote: &str, branch: &str) -> BumpResult<()>;
}

/// [`Gateway`] backed by the local `git` installation.
#[derive(Debug)]
pub struct GitGateway {
    root: PathBuf,
    _lock: WorkTreeLock,
}

impl GitGateway {
    /// Open the work tree containing `path` and take its lock.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if `git` is not in `PATH`,
    /// `GitError::NotARepository` outside a work tree, and
    /// `GitError::WorkTreeLocked` if another run holds the lock.
    pub fn open(path: &Path) -> BumpResult<Self> {
        let git = which::which("git").map_err(|_| ProcessError::ExecutableNotFound {
            name: "git".to_string(),
        })?;
        debug!(git = %git.display(), "found git executable");

        let root = query::work_tree_root(path)?;
        let git_dir = query::git_dir(&root)?;
        let lock = WorkTreeLock::acquire(&git_dir)?;

        debug!(root = %root.display(), "opened work tree");
        Ok(Self { root, _lock: lock })
    }
}

/// Stderr of a failed git command, or the whole error otherwise.
fn failure_message(err: &BumpError) -> String {
    match err.as_git() {
        Some(GitError::CommandFailed { message, .. }) => message.clone(),
        _ => err.to_string(),
    }
}

impl Gateway for GitGateway {
    fn repo_root(&self) -> &Path {
        &self.root
    }

    fn current_branch(&self) -> BumpResult<Option<String>> {
        query::current_branch(&self.root)
    }

    fn local_branch_exists(&self, branch: &str) -> BumpResult<bool> {
        query::local_branch_exists(&self.root, branch)
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> BumpResult<bool> {
        query::remote_branch_exists(&self.root, remote, branch)
    }

    fn resolve_ref(&self, revision: &str) -> BumpResult<String> {
        query::resolve_commit(&self.root, revision)
    }

    fn merge_base(&self, main: &str, branch: &str) -> BumpResult<String> {
        cmd::merge_base(&self.root, main, branch).map_err(|e| {
            GitError::DivergenceNotFound {
                main: main.to_string(),
                branch: branch.to_string(),
                message: failure_message(&e),
            }
            .into()
        })
    }

    fn changed_files(&self, base: &str, head: &str) -> BumpResult<Vec<String>> {
        cmd::diff_added_modified(&self.root, base, head)
    }

    fn read_file_at(&self, commit: &str, path: &str) -> BumpResult<TreeEntry> {
        cmd::read_blob(&self.root, commit, path)
    }

    fn is_dirty(&self) -> BumpResult<bool> {
        query::has_uncommitted_changes(&self.root)
    }

    fn fetch(&mut self, remote: &str, refspec: Option<&str>) -> BumpResult<()> {
        cmd::fetch(&self.root, remote, refspec)
    }

    fn checkout(&mut self, branch: &str) -> BumpResult<()> {
        cmd::checkout(&self.root, branch).map_err(|e| {
            GitError::CheckoutFailed {
                what: branch.to_string(),
                message: failure_message(&e),
            }
            .into()
        })
    }

    fn checkout_tracking(&mut self, branch: &str, upstream: &str) -> BumpResult<()> {
        cmd::checkout_tracking(&self.root, branch, upstream).map_err(|e| {
            GitError::CheckoutFailed {
                what: format!("{branch} from {upstream}"),
                message: failure_message(&e),
            }
            .into()
        })
    }

    fn stage(&mut self, paths: &[String]) -> BumpResult<()> {
        cmd::add(&self.root, paths)
    }

    fn discard(&mut self, paths: &[String]) -> BumpResult<()> {
        cmd::restore(&self.root, paths)
    }

    fn commit(&mut self, branch: &str, message: &str) -> BumpResult<()> {
        cmd::commit(&self.root, message).map_err(|e| {
            GitError::CommitFailed {
                branch: branch.to_string(),
                message: failure_message(&e),
            }
            .into()
        })
    }

    fn rebase(&mut self, onto: &str) -> BumpResult<()> {
        let Err(e) = cmd::rebase(&self.root, onto) else {
            return Ok(());
        };
        if let Err(abort) = cmd::rebase_abort(&self.root) {
            warn!(onto, error = %abort, "failed to abort rebase");
        }
        Err(GitError::RebaseConflict {
            onto: onto.to_string(),
            message: failure_message(&e),
        }
        .into())
    }

    fn push_force_with_lease(&mut self, remote: &str, branch: &str) -> BumpResult<()> {
        cmd::push_force_with_lease(&self.root, remote, branch).map_err(|e| {
            GitError::PushRejected {
                remote: remote.to_string(),
                branch: branch.to_string(),
                message: failure_message(&e),
            }
            .into()
        })
    }
}
