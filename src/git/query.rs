// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```
//!
//! Uses gix for read-only operations (faster, no subprocess overhead).

use crate::error::BumpResult;
use std::path::{Path, PathBuf};

use super::backend::{GitQuery, GixBackend};

/// Top-level directory of the work tree containing `path`.
///
/// # Errors
///
/// Returns `GitError::NotARepository` if `path` is outside any work tree, or a
/// `GitError` for bare repositories.
pub fn work_tree_root(path: &Path) -> BumpResult<PathBuf> {
    GixBackend::work_tree_root(path)
}

/// The `.git` directory of the repository containing `path`.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery fails.
pub fn git_dir(path: &Path) -> BumpResult<PathBuf> {
    GixBackend::git_dir(path)
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn current_branch(path: &Path) -> BumpResult<Option<String>> {
    GixBackend::current_branch(path)
}

/// Check whether `refs/heads/<branch>` exists.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or reference lookup fails.
pub fn local_branch_exists(path: &Path, branch: &str) -> BumpResult<bool> {
    GixBackend::ref_exists(path, &format!("refs/heads/{branch}"))
}

/// Check whether `refs/remotes/<remote>/<branch>` exists.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or reference lookup fails.
pub fn remote_branch_exists(path: &Path, remote: &str, branch: &str) -> BumpResult<bool> {
    GixBackend::ref_exists(path, &format!("refs/remotes/{remote}/{branch}"))
}

/// Resolve a revision (branch, remote ref, sha) to its full commit id.
///
/// # Errors
///
/// Returns `GitError::BranchNotFound` if the revision does not resolve.
pub fn resolve_commit(path: &Path, revision: &str) -> BumpResult<String> {
    GixBackend::resolve_commit(path, revision)
}

/// Whether tracked files differ from `HEAD`, staged or not.
///
/// # Errors
///
/// Returns a `GitError` if the status check fails.
pub fn has_uncommitted_changes(path: &Path) -> BumpResult<bool> {
    GixBackend::has_uncommitted_changes(path)
}
