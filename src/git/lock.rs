// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exclusive advisory lock on a work tree.
//!
//! ```text
//! <git-dir>/prbump.lock   flock(LOCK_EX | LOCK_NB)
//!   held    --> GitError::WorkTreeLocked
//!   free    --> WorkTreeLock (released on drop)
//! ```

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{BumpResult, FsError, GitError};

/// File name of the lock inside the git directory.
pub const LOCK_FILE_NAME: &str = "prbump.lock";

/// Guard holding the work tree lock for its lifetime.
#[derive(Debug)]
pub struct WorkTreeLock {
    file: File,
    path: PathBuf,
}

impl WorkTreeLock {
    /// Take the lock in `git_dir` without blocking.
    ///
    /// # Errors
    ///
    /// Returns `GitError::WorkTreeLocked` if another process holds it, or an
    /// `FsError` if the lock file cannot be opened.
    pub fn acquire(git_dir: &Path) -> BumpResult<Self> {
        let path = git_dir.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| FsError::IoError {
                path: path.display().to_string(),
                source,
            })?;

        if file.try_lock_exclusive().is_err() {
            return Err(GitError::WorkTreeLocked {
                path: path.display().to_string(),
            }
            .into());
        }

        debug!(path = %path.display(), "acquired work tree lock");
        Ok(Self { file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WorkTreeLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!(path = %self.path.display(), error = %e, "failed to release work tree lock");
        }
    }
}
