// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `prbump` binary.

use std::path::Path;
use std::process::{Command, Output};

fn git(cwd: &Path, args: &[&str]) -> String {
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

fn prbump(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prbump"))
        .args(args)
        .current_dir(cwd)
        .env_remove("PRBUMP_GIT__MAIN_BRANCH")
        .env_remove("PRBUMP_GIT__REMOTE")
        .env_remove("PRBUMP_GIT__PUSH")
        .output()
        .expect("failed to run prbump")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Work tree with a bare origin and a pushed `feat` branch adding `a.txt`.
fn setup(temp: &Path) -> std::path::PathBuf {
    let origin = temp.join("origin.git");
    let work = temp.join("work");
    std::fs::create_dir_all(&origin).unwrap();
    std::fs::create_dir_all(&work).unwrap();

    git(&origin, &["init", "--quiet", "--bare"]);
    git(&work, &["init", "--quiet"]);
    git(&work, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(&work, &["config", "user.email", "test@test.com"]);
    git(&work, &["config", "user.name", "Test"]);
    git(&work, &["config", "commit.gpgsign", "false"]);
    std::fs::write(work.join("README.md"), "# demo\n").unwrap();
    git(&work, &["add", "README.md"]);
    git(&work, &["commit", "--quiet", "-m", "initial"]);
    let url = origin.to_string_lossy().to_string();
    git(&work, &["remote", "add", "origin", &url]);
    git(&work, &["push", "--quiet", "-u", "origin", "main"]);

    git(&work, &["checkout", "-q", "-b", "feat"]);
    std::fs::write(work.join("a.txt"), "version = 1.2\n").unwrap();
    git(&work, &["add", "a.txt"]);
    git(&work, &["commit", "--quiet", "-m", "feat"]);
    git(&work, &["push", "--quiet", "-u", "origin", "feat"]);
    git(&work, &["checkout", "-q", "main"]);
    work
}

#[test]
fn cli_version_command() {
    let temp = tempfile::tempdir().unwrap();
    let output = prbump(temp.path(), &["version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), env!("CARGO_PKG_VERSION"));
}

#[test]
fn cli_no_command_fails() {
    let temp = tempfile::tempdir().unwrap();
    let output = prbump(temp.path(), &[]);
    assert!(!output.status.success());
}

#[test]
fn cli_update_prints_tally() {
    let temp = tempfile::tempdir().unwrap();
    let work = setup(temp.path());

    let output = prbump(
        &work,
        &[
            "update",
            "--branches",
            "feat",
            "--old-value",
            "1.2",
            "--new-value",
            "1.3",
        ],
    );

    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "1/1 branches processed successfully");
    assert_eq!(git(&work, &["show", "feat:a.txt"]), "version = 1.3");
}

#[test]
fn cli_failed_branch_sets_failure_exit_code() {
    let temp = tempfile::tempdir().unwrap();
    let work = setup(temp.path());

    let output = prbump(
        &work,
        &[
            "update",
            "--branches",
            "feat",
            "missing",
            "--old-value",
            "1.2",
            "--new-value",
            "1.3",
        ],
    );

    assert!(!output.status.success());
    assert_eq!(stdout(&output), "1/2 branches processed successfully");
}

#[test]
fn cli_dry_run_json_report() {
    let temp = tempfile::tempdir().unwrap();
    let work = setup(temp.path());
    let head = git(&work, &["rev-parse", "feat"]);
    let list = temp.path().join("branches.json");
    std::fs::write(&list, r#"{"branches": ["feat"]}"#).unwrap();
    let list = list.to_string_lossy().to_string();

    let output = prbump(
        &work,
        &[
            "update",
            "--branches-file",
            &list,
            "--old-value",
            "1.2",
            "--new-value",
            "1.3",
            "--dry-run",
            "--json",
        ],
    );

    assert!(output.status.success(), "{output:?}");
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["succeeded"], 1);
    assert_eq!(report["branches"][0]["status"], "done");
    assert_eq!(report["branches"][0]["update"]["updated_paths"][0], "a.txt");
    assert_eq!(git(&work, &["rev-parse", "feat"]), head);
}

#[test]
fn cli_outside_repository_fails_before_processing() {
    let temp = tempfile::tempdir().unwrap();
    let output = prbump(
        temp.path(),
        &[
            "update",
            "--branches",
            "feat",
            "--old-value",
            "1.2",
            "--new-value",
            "1.3",
        ],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a git repository"), "{stderr}");
}

#[test]
fn cli_empty_old_value_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let work = setup(temp.path());
    let output = prbump(
        &work,
        &[
            "update",
            "--branches",
            "feat",
            "--old-value",
            "",
            "--new-value",
            "1.3",
        ],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_options_reflect_repo_config_and_set() {
    let temp = tempfile::tempdir().unwrap();
    let work = setup(temp.path());
    std::fs::write(work.join("prbump.toml"), "[git]\nmain_branch = \"develop\"\n").unwrap();

    let output = prbump(&work, &["options", "--set", "git.remote=fork"]);

    assert!(output.status.success(), "{output:?}");
    let text = stdout(&output);
    assert!(text.contains("git.main_branch         = develop"), "{text}");
    assert!(text.contains("git.remote              = fork"), "{text}");
}

#[test]
fn cli_invalid_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    let work = setup(temp.path());
    std::fs::write(work.join("prbump.toml"), "[git]\nbogus = 1\n").unwrap();

    let output = prbump(&work, &["options"]);
    assert!(!output.status.success());
}

#[test]
fn cli_dirty_work_tree_is_refused_before_processing() {
    let temp = tempfile::tempdir().unwrap();
    let work = setup(temp.path());
    std::fs::write(work.join("README.md"), "# demo, edited locally\n").unwrap();
    let head = git(&work, &["rev-parse", "feat"]);

    let output = prbump(
        &work,
        &[
            "update",
            "--branches",
            "feat",
            "--old-value",
            "1.2",
            "--new-value",
            "1.3",
        ],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("uncommitted changes"), "{stderr}");
    assert_eq!(git(&work, &["rev-parse", "feat"]), head);
    assert_eq!(git(&work, &["branch", "--show-current"]), "main");
}
