// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use clap::Parser;
use std::path::Path;

fn parse_update(args: &[&str]) -> crate::cli::update::UpdateArgs {
    let cli = Cli::try_parse_from(args).unwrap();
    match cli.command {
        Some(Command::Update(update)) => update,
        other => panic!("expected update command, got {other:?}"),
    }
}

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["prbump", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));

    let alias = Cli::try_parse_from(["prbump", "-v"]).unwrap();
    assert!(matches!(alias.command, Some(Command::Version)));
}

#[test]
fn test_parse_update_with_branches() {
    let args = parse_update(&[
        "prbump",
        "update",
        "--branches",
        "feature/a",
        "feature/b",
        "--old-value",
        "1.2",
        "--new-value",
        "1.3",
    ]);
    assert_eq!(args.branches, vec!["feature/a", "feature/b"]);
    assert_eq!(args.old_value, "1.2");
    assert_eq!(args.new_value, "1.3");
    assert!(args.branches_file.is_none());
    assert!(!args.dry_run && !args.push && !args.json && !args.whole_token);
    assert!(args.to_config_overrides().is_empty());
}

#[test]
fn test_parse_update_with_branches_file() {
    let args = parse_update(&[
        "prbump",
        "update",
        "--branches-file",
        "branches.json",
        "--old-value",
        "1.2",
        "--new-value",
        "1.3",
        "--dry-run",
    ]);
    assert_eq!(args.branches_file.as_deref(), Some(Path::new("branches.json")));
    assert!(args.branches.is_empty());
    assert!(args.dry_run);
}

#[test]
fn test_update_requires_exactly_one_branch_source() {
    let neither = Cli::try_parse_from([
        "prbump",
        "update",
        "--old-value",
        "1.2",
        "--new-value",
        "1.3",
    ]);
    assert!(neither.is_err());

    let both = Cli::try_parse_from([
        "prbump",
        "update",
        "--branches",
        "a",
        "--branches-file",
        "b.json",
        "--old-value",
        "1.2",
        "--new-value",
        "1.3",
    ]);
    assert!(both.is_err());
}

#[test]
fn test_update_requires_values() {
    let result = Cli::try_parse_from(["prbump", "update", "--branches", "a", "--old-value", "1.2"]);
    assert!(result.is_err());
}

#[test]
fn test_update_overrides() {
    let args = parse_update(&[
        "prbump",
        "update",
        "--branches",
        "a",
        "--old-value",
        "1.2",
        "--new-value",
        "1.3",
        "--main-branch",
        "develop",
        "--remote",
        "upstream",
        "--push",
        "--whole-token",
        "--exclude",
        "*.lock",
        "--exclude",
        "docs/**",
    ]);
    assert_eq!(args.exclude, vec!["*.lock", "docs/**"]);
    insta::assert_snapshot!(args.to_config_overrides().join("\n"), @r"
    git.main_branch=develop
    git.remote=upstream
    git.push=true
    update.match_mode=whole-token
    ");
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "prbump",
        "options",
        "-C",
        "/work/repo",
        "-l",
        "4",
        "--set",
        "git.remote=fork",
    ])
    .unwrap();
    assert_eq!(cli.global.repo_dir(), Path::new("/work/repo"));
    assert_eq!(
        cli.global.to_config_overrides(),
        vec![
            "git.remote=fork",
            "global.output_log_level=4",
            "global.file_log_level=4",
        ]
    );
}

#[test]
fn test_global_defaults() {
    let cli = Cli::try_parse_from(["prbump", "options"]).unwrap();
    assert_eq!(cli.global.repo_dir(), Path::new("."));
    assert!(cli.global.to_config_overrides().is_empty());
    assert!(!cli.global.no_repo_config);
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["prbump", "-l", "7", "options"]).is_err());
    let cli = Cli::try_parse_from(["prbump", "-l", "0", "--file-log-level", "6", "options"]).unwrap();
    assert_eq!(
        cli.global.to_config_overrides(),
        vec!["global.output_log_level=0", "global.file_log_level=6"]
    );
}
