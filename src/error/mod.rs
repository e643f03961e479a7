// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            BumpError (16 bytes)
//!                   |
//!      +------+-----+------+------+
//!      |      |     |      |      |
//!      v      v     v      v      v
//!     Git    Cfg  Process  Fs     Io
//!     Box    Box   Box    Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git     NotARepository, BranchNotFound, DivergenceNotFound,
//!           CheckoutFailed, CommitFailed, RebaseConflict,
//!           PushRejected, CommandFailed, UncommittedChanges,
//!           WorkTreeLocked, Gix
//!   Config  ParseError, InvalidValue
//!   Process ExecutableNotFound
//!   Fs      NotFound, IoError, InvalidUtf8
//!
//! All variants boxed => BumpError stays two words wide.
//! ```
//!
//! Only [`FsError`] is isolated per file by the updater. Every [`GitError`]
//! aborts the branch being processed, never the batch.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BumpError`].
pub type BumpResult<T> = std::result::Result<T, BumpError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum BumpError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl BumpError {
    /// Returns the git error if this is one.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(err),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BumpError {
                fn from(err: $error) -> Self {
                    BumpError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Path is not inside a git work tree.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Branch exists neither locally nor on the remote.
    #[error("branch not found: {branch}")]
    BranchNotFound { branch: String },

    /// The two refs share no history.
    #[error("no common ancestor between {main} and {branch}: {message}")]
    DivergenceNotFound {
        main: String,
        branch: String,
        message: String,
    },

    /// Checkout operation failed.
    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },

    /// Staging or committing failed.
    #[error("failed to commit on {branch}: {message}")]
    CommitFailed { branch: String, message: String },

    /// Rebase stopped on a conflict and was rolled back.
    #[error("rebase onto {onto} hit conflicts, manual resolution required: {message}")]
    RebaseConflict { onto: String, message: String },

    /// Remote refused the lease-protected push.
    #[error("push of {branch} to {remote} rejected: {message}")]
    PushRejected {
        remote: String,
        branch: String,
        message: String,
    },

    /// The work tree has edits a run would mix with its own.
    #[error("uncommitted changes in {path}, commit or stash them first")]
    UncommittedChanges { path: String },

    /// Another instance holds the work tree.
    #[error("work tree is locked by another run: {path}")]
    WorkTreeLocked { path: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid UTF-8.
    #[error("not valid UTF-8 text: {path}")]
    InvalidUtf8 { path: String },
}
