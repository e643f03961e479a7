// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Where a branch left main, and what it touched since.
//!
//! ```text
//! main ---o---o---o---o  origin/main
//!              \
//!               B---x---x  branch (head)
//!
//! merge base = B
//! change set = diff --diff-filter=AM B..head
//! ```

use tracing::debug;

use crate::error::BumpResult;
use crate::git::Gateway;
use crate::update::ChangeSet;

/// Commit id of the most recent common ancestor of `main` and `branch`.
///
/// # Errors
///
/// Returns `GitError::DivergenceNotFound` if the refs share no history.
pub fn resolve_divergence<G: Gateway + ?Sized>(
    gateway: &G,
    main: &str,
    branch: &str,
) -> BumpResult<String> {
    let base = gateway.merge_base(main, branch)?;
    debug!(main, branch, base = %base, "found merge base");
    Ok(base)
}

/// Files added or modified between `base` and `head`.
///
/// # Errors
///
/// Returns a `GitError` if the diff cannot be computed.
pub fn change_set<G: Gateway + ?Sized>(gateway: &G, base: &str, head: &str) -> BumpResult<ChangeSet> {
    let files = gateway.changed_files(base, head)?;
    Ok(files.into_iter().collect())
}
