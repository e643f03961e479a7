// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//!                     --> ShellBackend (git CLI, fallback)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{BumpResult, GitError, GixError};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::trace;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Top-level directory of the work tree containing `path`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotARepository` if `path` is not inside a work tree.
    fn work_tree_root(path: &Path) -> BumpResult<PathBuf>;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> BumpResult<Option<String>>;

    /// Check whether a fully-qualified ref (`refs/heads/x`) exists.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or reference lookup fails.
    fn ref_exists(path: &Path, full_name: &str) -> BumpResult<bool>;

    /// Resolve a revision to its full commit id.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BranchNotFound` if the revision does not resolve.
    fn resolve_commit(path: &Path, revision: &str) -> BumpResult<String>;

    /// Whether tracked files have staged or unstaged changes. Untracked
    /// files are not counted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status cannot be computed.
    fn has_uncommitted_changes(path: &Path) -> BumpResult<bool>;
}

/// What a path names in a commit's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    /// Nothing at that path.
    Absent,
    /// A directory, symlink or submodule.
    NotRegular,
    /// Contents of a regular (optionally executable) file.
    File(Vec<u8>),
}

// --- Mutation Trait (Write operations) ---

/// Git operations that run through the git CLI.
///
/// Besides work tree mutations this includes the history queries gix does not
/// cover with the enabled features (merge base, tree diff, blob reads).
pub trait GitMutation {
    /// Fetch from a remote, optionally a single refspec.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the fetch operation fails.
    fn fetch(repo_path: &Path, remote: &str, refspec: Option<&str>) -> BumpResult<()>;

    /// Checkout an existing local branch.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout(repo_path: &Path, what: &str) -> BumpResult<()>;

    /// Create `branch` tracking `upstream` and check it out.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch cannot be created or checked out.
    fn checkout_tracking(repo_path: &Path, branch: &str, upstream: &str) -> BumpResult<()>;

    /// Stage the given repository-relative paths.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    fn add(repo_path: &Path, paths: &[String]) -> BumpResult<()>;

    /// Commit whatever is staged.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git commit` fails.
    fn commit(repo_path: &Path, message: &str) -> BumpResult<()>;

    /// Rebase the current branch onto `onto`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the rebase stops (conflict or otherwise).
    fn rebase(repo_path: &Path, onto: &str) -> BumpResult<()>;

    /// Abort an in-progress rebase.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if no rebase is in progress or abort fails.
    fn rebase_abort(repo_path: &Path) -> BumpResult<()>;

    /// `git push --force-with-lease <remote> <branch>`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote rejects the push.
    fn push_force_with_lease(repo_path: &Path, remote: &str, branch: &str) -> BumpResult<()>;

    /// Most recent common ancestor of two revisions.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if either revision is unknown or there is no
    /// common history.
    fn merge_base(repo_path: &Path, one: &str, two: &str) -> BumpResult<String>;

    /// Paths added or modified between two commits.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git diff` fails.
    fn diff_added_modified(repo_path: &Path, base: &str, head: &str) -> BumpResult<Vec<String>>;

    /// Unstage `paths` and reset their work tree copies to `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git restore` fails.
    fn restore(repo_path: &Path, paths: &[String]) -> BumpResult<()>;

    /// What `path` names at `commit`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the tree or blob cannot be read.
    fn read_blob(repo_path: &Path, commit: &str, path: &str) -> BumpResult<TreeEntry>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides efficient read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GixBackend {
    fn discover(path: &Path) -> BumpResult<gix::Repository> {
        Ok(gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?)
    }

    /// The `.git` directory of the repository containing `path`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery fails.
    pub fn git_dir(path: &Path) -> BumpResult<PathBuf> {
        Ok(Self::discover(path)?.git_dir().to_path_buf())
    }
}

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok()
    }

    fn work_tree_root(path: &Path) -> BumpResult<PathBuf> {
        let repo = gix::discover(path).map_err(|_| GitError::NotARepository {
            path: path.display().to_string(),
        })?;
        let workdir = repo
            .workdir()
            .ok_or(GitError::Gix(GixError::BareRepository))?;
        Ok(workdir.to_path_buf())
    }

    fn current_branch(path: &Path) -> BumpResult<Option<String>> {
        let repo = Self::discover(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn ref_exists(path: &Path, full_name: &str) -> BumpResult<bool> {
        let repo = Self::discover(path)?;
        match repo.find_reference(full_name) {
            Ok(_) => Ok(true),
            Err(gix::reference::find::existing::Error::NotFound { name: _ }) => Ok(false),
            Err(e) => Err(GitError::Gix(GixError::Head(e)).into()),
        }
    }

    fn resolve_commit(path: &Path, revision: &str) -> BumpResult<String> {
        let repo = Self::discover(path)?;
        let id = repo
            .rev_parse_single(revision)
            .map_err(|_| GitError::BranchNotFound {
                branch: revision.to_string(),
            })?;
        Ok(id.detach().to_string())
    }

    fn has_uncommitted_changes(path: &Path) -> BumpResult<bool> {
        use gix::status::UntrackedFiles;

        let status_failed = |message: &str| GitError::CommandFailed {
            command: "status".to_string(),
            message: message.to_string(),
        };
        let repo = Self::discover(path)?;
        let dirty = repo
            .status(gix::progress::Discard)
            .map_err(|_| status_failed("failed to prepare status check"))?
            .untracked_files(UntrackedFiles::None)
            .into_iter(None)
            .map_err(|_| status_failed("failed to check repository status"))?
            .next()
            .is_some();
        Ok(dirty)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Required for:
/// - Work tree mutations (checkout, commit, rebase)
/// - Remote transport (fetch, push with lease)
/// - Operations not yet supported by gix with the enabled features
pub struct ShellBackend;

impl ShellBackend {
    fn run(args: &[&str], cwd: &Path) -> BumpResult<Output> {
        trace!(cwd = %cwd.display(), args = ?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(output)
    }

    /// Execute a git command and return trimmed stdout.
    /// Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> BumpResult<String> {
        let output = Self::run(args, cwd)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Execute a git command and return stdout untouched.
    pub(crate) fn git_bytes(args: &[&str], cwd: &Path) -> BumpResult<Vec<u8>> {
        Ok(Self::run(args, cwd)?.stdout)
    }
}

impl GitMutation for ShellBackend {
    fn fetch(repo_path: &Path, remote: &str, refspec: Option<&str>) -> BumpResult<()> {
        let mut args = vec!["fetch", "--quiet", remote];
        if let Some(spec) = refspec {
            args.push(spec);
        }
        Self::git_command(&args, repo_path)?;
        Ok(())
    }

    fn checkout(repo_path: &Path, what: &str) -> BumpResult<()> {
        Self::git_command(
            &["-c", "advice.detachedHead=false", "checkout", "-q", what],
            repo_path,
        )?;
        Ok(())
    }

    fn checkout_tracking(repo_path: &Path, branch: &str, upstream: &str) -> BumpResult<()> {
        Self::git_command(
            &["checkout", "-q", "--track", "-b", branch, upstream],
            repo_path,
        )?;
        Ok(())
    }

    fn add(repo_path: &Path, paths: &[String]) -> BumpResult<()> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        Self::git_command(&args, repo_path)?;
        Ok(())
    }

    fn commit(repo_path: &Path, message: &str) -> BumpResult<()> {
        Self::git_command(&["commit", "--quiet", "-m", message], repo_path)?;
        Ok(())
    }

    fn rebase(repo_path: &Path, onto: &str) -> BumpResult<()> {
        Self::git_command(&["rebase", "--quiet", onto], repo_path)?;
        Ok(())
    }

    fn rebase_abort(repo_path: &Path) -> BumpResult<()> {
        Self::git_command(&["rebase", "--abort"], repo_path)?;
        Ok(())
    }

    fn push_force_with_lease(repo_path: &Path, remote: &str, branch: &str) -> BumpResult<()> {
        Self::git_command(
            &["push", "--quiet", "--force-with-lease", remote, branch],
            repo_path,
        )?;
        Ok(())
    }

    fn merge_base(repo_path: &Path, one: &str, two: &str) -> BumpResult<String> {
        Self::git_command(&["merge-base", one, two], repo_path)
    }

    fn diff_added_modified(repo_path: &Path, base: &str, head: &str) -> BumpResult<Vec<String>> {
        let output = Self::git_bytes(
            &[
                "diff",
                "--name-only",
                "--diff-filter=AM",
                "--no-renames",
                "-z",
                base,
                head,
            ],
            repo_path,
        )?;
        Ok(parse_nul_separated(&output))
    }

    fn restore(repo_path: &Path, paths: &[String]) -> BumpResult<()> {
        let mut args = vec!["restore", "--staged", "--worktree", "--"];
        args.extend(paths.iter().map(String::as_str));
        Self::git_command(&args, repo_path)?;
        Ok(())
    }

    fn read_blob(repo_path: &Path, commit: &str, path: &str) -> BumpResult<TreeEntry> {
        let listing = Self::git_command(&["ls-tree", "-z", commit, "--", path], repo_path)?;
        if listing.is_empty() {
            return Ok(TreeEntry::Absent);
        }
        let Some(object) = regular_blob_id(&listing) else {
            return Ok(TreeEntry::NotRegular);
        };
        Self::git_bytes(&["cat-file", "blob", object], repo_path).map(TreeEntry::File)
    }
}

impl GitQuery for ShellBackend {
    fn is_git_repo(path: &Path) -> bool {
        Self::git_command(&["rev-parse", "--is-inside-work-tree"], path).is_ok()
    }

    fn work_tree_root(path: &Path) -> BumpResult<PathBuf> {
        Self::git_command(&["rev-parse", "--show-toplevel"], path)
            .map(PathBuf::from)
            .map_err(|_| {
                GitError::NotARepository {
                    path: path.display().to_string(),
                }
                .into()
            })
    }

    fn current_branch(path: &Path) -> BumpResult<Option<String>> {
        Self::git_command(&["symbolic-ref", "--short", "HEAD"], path)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }

    fn ref_exists(path: &Path, full_name: &str) -> BumpResult<bool> {
        Ok(Self::git_command(&["show-ref", "--verify", "--quiet", full_name], path).is_ok())
    }

    fn resolve_commit(path: &Path, revision: &str) -> BumpResult<String> {
        let spec = format!("{revision}^{{commit}}");
        Self::git_command(&["rev-parse", "--verify", "--quiet", &spec], path).map_err(|_| {
            GitError::BranchNotFound {
                branch: revision.to_string(),
            }
            .into()
        })
    }

    fn has_uncommitted_changes(path: &Path) -> BumpResult<bool> {
        Ok(!Self::git_command(&["status", "--porcelain", "--untracked-files=no"], path)?.is_empty())
    }
}

/// Splits `-z` output into paths, dropping the trailing empty entry.
pub(crate) fn parse_nul_separated(output: &[u8]) -> Vec<String> {
    output
        .split(|&b| b == 0)
        .filter(|entry| !entry.is_empty())
        .map(|entry| String::from_utf8_lossy(entry).into_owned())
        .collect()
}

/// Object id from one `ls-tree` entry (`<mode> <type> <id>\t<path>`) when it
/// is a regular (optionally executable) file.
pub(crate) fn regular_blob_id(listing: &str) -> Option<&str> {
    let entry = listing.split('\0').next()?;
    let (meta, _path) = entry.split_once('\t')?;
    let mut fields = meta.split_whitespace();
    let mode = fields.next()?;
    let kind = fields.next()?;
    let object = fields.next()?;
    (kind == "blob" && matches!(mode, "100644" | "100755")).then_some(object)
}

#[cfg(test)]
mod tests;
