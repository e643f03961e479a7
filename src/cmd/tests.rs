// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::cmd::config::build_config_loader;
use crate::cmd::update::collect_branches;
use crate::config::types::MatchMode;
use crate::git::test_support::init_repo;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn test_repo_config_is_loaded_from_work_tree_root() {
    let temp = tempfile::tempdir().unwrap();
    init_repo(temp.path());
    std::fs::write(
        temp.path().join("prbump.toml"),
        "[git]\nmain_branch = \"develop\"\n",
    )
    .unwrap();
    let sub = temp.path().join("src");
    std::fs::create_dir_all(&sub).unwrap();

    let repo = sub.to_string_lossy().to_string();
    let cli = parse(&["prbump", "-C", &repo, "options"]);
    let loader = build_config_loader(&cli.global, None).unwrap();
    assert_eq!(loader.loaded_files().len(), 1);

    let config = loader.build().unwrap();
    assert_eq!(config.git.main_branch, "develop");
}

#[test]
fn test_no_repo_config_skips_file() {
    let temp = tempfile::tempdir().unwrap();
    init_repo(temp.path());
    std::fs::write(temp.path().join("prbump.toml"), "[git]\nremote = \"fork\"\n").unwrap();

    let repo = temp.path().to_string_lossy().to_string();
    let cli = parse(&["prbump", "-C", &repo, "--no-repo-config", "options"]);
    let config = build_config_loader(&cli.global, None).unwrap().build().unwrap();
    assert_eq!(config.git.remote, "origin");
}

#[test]
fn test_outside_repository_uses_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let repo = temp.path().to_string_lossy().to_string();
    let cli = parse(&["prbump", "-C", &repo, "options"]);

    let loader = build_config_loader(&cli.global, None).unwrap();
    assert!(loader.loaded_files().is_empty());
    assert_eq!(loader.build().unwrap().git.main_branch, "main");
}

#[test]
fn test_command_flags_override_set_and_files() {
    let temp = tempfile::tempdir().unwrap();
    let extra = temp.path().join("extra.toml");
    std::fs::write(&extra, "[git]\nremote = \"file\"\npush = false\n").unwrap();
    let extra = extra.to_string_lossy().to_string();
    let repo = temp.path().to_string_lossy().to_string();

    let cli = parse(&[
        "prbump",
        "-C",
        &repo,
        "--config",
        &extra,
        "--set",
        "git.remote=set",
        "update",
        "--branches",
        "a",
        "--old-value",
        "1.2",
        "--new-value",
        "1.3",
        "--remote",
        "flag",
        "--push",
        "--whole-token",
    ]);
    let Some(Command::Update(args)) = &cli.command else {
        panic!("expected update command");
    };

    let config = build_config_loader(&cli.global, Some(args))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.git.remote, "flag");
    assert!(config.git.push);
    assert_eq!(config.update.match_mode, MatchMode::WholeToken);
}

#[test]
fn test_collect_branches_from_args_and_file() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("branches.json");
    std::fs::write(&file, r#"["x", "y"]"#).unwrap();
    let file = file.to_string_lossy().to_string();

    let cli = parse(&[
        "prbump",
        "update",
        "--branches-file",
        &file,
        "--old-value",
        "1.2",
        "--new-value",
        "1.3",
    ]);
    let Some(Command::Update(args)) = &cli.command else {
        panic!("expected update command");
    };
    assert_eq!(collect_branches(args).unwrap(), vec!["x", "y"]);

    let cli = parse(&[
        "prbump",
        "update",
        "--branches",
        "a",
        " ",
        "--old-value",
        "1.2",
        "--new-value",
        "1.3",
    ]);
    let Some(Command::Update(args)) = &cli.command else {
        panic!("expected update command");
    };
    assert!(collect_branches(args).is_err());
}
