// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared helpers for tests that need a real repository.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Run git in `cwd` with a fixed identity, panicking on failure.
pub(crate) fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a repository whose default branch is `main`.
pub(crate) fn init_repo(path: &Path) {
    git(path, &["init", "--quiet"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test"]);
    git(path, &["config", "commit.gpgsign", "false"]);
}

/// Write `content` to `rel` and commit it.
pub(crate) fn commit_file(repo: &Path, rel: &str, content: &str, message: &str) {
    let path = repo.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    std::fs::write(&path, content).expect("failed to write file");
    git(repo, &["add", "--", rel]);
    git(repo, &["commit", "--quiet", "-m", message]);
}

/// A work tree on `main` with a bare `origin` it has pushed to.
///
/// Layout: `<temp>/work` and `<temp>/origin.git`.
pub(crate) fn repo_with_origin(temp: &Path) -> (PathBuf, PathBuf) {
    let remote = temp.join("origin.git");
    let work = temp.join("work");
    std::fs::create_dir_all(&remote).expect("failed to create remote dir");
    std::fs::create_dir_all(&work).expect("failed to create work dir");

    git(&remote, &["init", "--quiet", "--bare"]);
    init_repo(&work);
    commit_file(&work, "README.md", "# project\n", "initial");

    let remote_url = remote.to_string_lossy().to_string();
    git(&work, &["remote", "add", "origin", &remote_url]);
    git(&work, &["push", "--quiet", "-u", "origin", "main"]);
    (work, remote)
}
