// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!            gateway.rs (Gateway trait, GitGateway + lock.rs)
//!                 /              \
//!           query.rs            cmd.rs
//!               |                  |
//!      ,------------------------------------,
//!      |          backend (traits)          |
//!      '-------+-------------------+--------'
//!              |                   |
//!              v                   v
//!          GitQuery           GitMutation
//!         (gix, read)        (CLI, write + history)
//!              |                   |
//!              v                   v
//!          GixBackend         ShellBackend
//!          .work_tree_root    .checkout / .commit
//!          .current_branch    .rebase / .push --force-with-lease
//!          .ref_exists        .merge_base / .diff
//!          .resolve_commit    .read_blob / .restore
//!          .has_uncommitted_changes
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for writes, transport and history walks.

pub mod backend;
pub mod cmd;
pub mod gateway;
pub mod lock;
pub mod query;

pub use backend::TreeEntry;
pub use gateway::{Gateway, GitGateway};

#[cfg(test)]
pub(crate) mod test_support;
