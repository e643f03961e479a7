// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (work tree writes, transport, history)
//! ```

use crate::error::BumpResult;
use std::path::Path;

use super::backend::{GitMutation, ShellBackend, TreeEntry};

/// Fetch from remote, optionally a single refspec.
///
/// # Errors
///
/// Returns a `GitError` if the fetch operation fails.
pub fn fetch(repo_path: &Path, remote: &str, refspec: Option<&str>) -> BumpResult<()> {
    ShellBackend::fetch(repo_path, remote, refspec)
}

/// Checkout an existing branch.
///
/// # Errors
///
/// Returns a `GitError` if the checkout operation fails.
pub fn checkout(repo_path: &Path, what: &str) -> BumpResult<()> {
    ShellBackend::checkout(repo_path, what)
}

/// Create a local branch tracking `upstream` and check it out.
///
/// # Errors
///
/// Returns a `GitError` if the branch cannot be created.
pub fn checkout_tracking(repo_path: &Path, branch: &str, upstream: &str) -> BumpResult<()> {
    ShellBackend::checkout_tracking(repo_path, branch, upstream)
}

/// Stage paths relative to the work tree root.
///
/// # Errors
///
/// Returns a `GitError` if `git add` fails.
pub fn add(repo_path: &Path, paths: &[String]) -> BumpResult<()> {
    ShellBackend::add(repo_path, paths)
}

/// Commit the index.
///
/// # Errors
///
/// Returns a `GitError` if `git commit` fails.
pub fn commit(repo_path: &Path, message: &str) -> BumpResult<()> {
    ShellBackend::commit(repo_path, message)
}

/// Rebase the current branch.
///
/// # Errors
///
/// Returns a `GitError` if the rebase stops.
pub fn rebase(repo_path: &Path, onto: &str) -> BumpResult<()> {
    ShellBackend::rebase(repo_path, onto)
}

/// Abort an in-progress rebase.
///
/// # Errors
///
/// Returns a `GitError` if the abort fails.
pub fn rebase_abort(repo_path: &Path) -> BumpResult<()> {
    ShellBackend::rebase_abort(repo_path)
}

/// Lease-protected force push.
///
/// # Errors
///
/// Returns a `GitError` if the remote rejects the push.
pub fn push_force_with_lease(repo_path: &Path, remote: &str, branch: &str) -> BumpResult<()> {
    ShellBackend::push_force_with_lease(repo_path, remote, branch)
}

/// Merge base of two revisions.
///
/// # Errors
///
/// Returns a `GitError` if there is no common history.
pub fn merge_base(repo_path: &Path, one: &str, two: &str) -> BumpResult<String> {
    ShellBackend::merge_base(repo_path, one, two)
}

/// Files added or modified between two commits.
///
/// # Errors
///
/// Returns a `GitError` if `git diff` fails.
pub fn diff_added_modified(repo_path: &Path, base: &str, head: &str) -> BumpResult<Vec<String>> {
    ShellBackend::diff_added_modified(repo_path, base, head)
}

/// What a path names at a commit.
///
/// # Errors
///
/// Returns a `GitError` if the tree or blob cannot be read.
pub fn read_blob(repo_path: &Path, commit: &str, path: &str) -> BumpResult<TreeEntry> {
    ShellBackend::read_blob(repo_path, commit, path)
}

/// Unstage paths and reset them to `HEAD` in the work tree.
///
/// # Errors
///
/// Returns a `GitError` if `git restore` fails.
pub fn restore(repo_path: &Path, paths: &[String]) -> BumpResult<()> {
    ShellBackend::restore(repo_path, paths)
}
