// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    GitMutation, GitQuery, GixBackend, ShellBackend, TreeEntry, parse_nul_separated,
    regular_blob_id,
};
use crate::git::test_support::{commit_file, git, init_repo};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn test_parse_nul_separated() {
    assert_eq!(
        parse_nul_separated(b"a.txt\0dir/b c.txt\0"),
        vec!["a.txt".to_string(), "dir/b c.txt".to_string()]
    );
    assert!(parse_nul_separated(b"").is_empty());
}

#[test]
fn test_regular_blob_id() {
    let file = "100644 blob 3b18e512dba79e4c8300dd08aeb37f8e728b8dad\tsrc/lib.rs\0";
    assert_eq!(
        regular_blob_id(file),
        Some("3b18e512dba79e4c8300dd08aeb37f8e728b8dad")
    );

    let exe = "100755 blob 3b18e512dba79e4c8300dd08aeb37f8e728b8dad\tbuild.sh";
    assert!(regular_blob_id(exe).is_some());

    let link = "120000 blob 3b18e512dba79e4c8300dd08aeb37f8e728b8dad\tlink";
    assert_eq!(regular_blob_id(link), None);

    let tree = "040000 tree 3b18e512dba79e4c8300dd08aeb37f8e728b8dad\tsrc";
    assert_eq!(regular_blob_id(tree), None);

    assert_eq!(regular_blob_id(""), None);
}

#[test]
fn test_backends_consistency() {
    let temp = temp_dir();

    assert!(!GixBackend::is_git_repo(temp.path()));
    assert!(!ShellBackend::is_git_repo(temp.path()));

    init_repo(temp.path());
    commit_file(temp.path(), "README.md", "# test\n", "initial");

    assert!(GixBackend::is_git_repo(temp.path()));
    assert!(ShellBackend::is_git_repo(temp.path()));

    assert_eq!(
        GixBackend::current_branch(temp.path()).unwrap(),
        ShellBackend::current_branch(temp.path()).unwrap()
    );
    assert_eq!(
        GixBackend::resolve_commit(temp.path(), "HEAD").unwrap(),
        ShellBackend::resolve_commit(temp.path(), "HEAD").unwrap()
    );
    assert_eq!(
        GixBackend::ref_exists(temp.path(), "refs/heads/main").unwrap(),
        ShellBackend::ref_exists(temp.path(), "refs/heads/main").unwrap()
    );
}

#[test]
fn test_work_tree_root_from_subdirectory() {
    let temp = temp_dir();
    init_repo(temp.path());
    let sub = temp.path().join("nested/deeper");
    std::fs::create_dir_all(&sub).unwrap();

    let root = GixBackend::work_tree_root(&sub).unwrap();
    assert_eq!(
        root.canonicalize().unwrap(),
        temp.path().canonicalize().unwrap()
    );
}

#[test]
fn test_work_tree_root_outside_repo() {
    let temp = temp_dir();
    let err = GixBackend::work_tree_root(temp.path()).unwrap_err();
    assert!(err.to_string().contains("not a git repository"), "{err}");
}

#[test]
fn test_resolve_unknown_revision() {
    let temp = temp_dir();
    init_repo(temp.path());
    commit_file(temp.path(), "README.md", "# test\n", "initial");

    assert!(GixBackend::resolve_commit(temp.path(), "no-such-branch").is_err());
    assert!(ShellBackend::resolve_commit(temp.path(), "no-such-branch").is_err());
}

#[test]
fn test_merge_base_and_diff() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);
    commit_file(repo, "shared.txt", "v1.2\n", "initial");
    let base = ShellBackend::resolve_commit(repo, "HEAD").unwrap();

    git(repo, &["checkout", "-q", "-b", "feature"]);
    commit_file(repo, "new file.txt", "1.2\n", "add");
    commit_file(repo, "shared.txt", "v1.2 changed\n", "modify");

    let found = ShellBackend::merge_base(repo, "main", "feature").unwrap();
    assert_eq!(found, base);

    let changed = ShellBackend::diff_added_modified(repo, &found, "feature").unwrap();
    assert_eq!(changed, vec!["new file.txt".to_string(), "shared.txt".to_string()]);
}

#[test]
fn test_read_blob() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);
    commit_file(repo, "dir/a.txt", "version = 1.2\n", "initial");

    let content = ShellBackend::read_blob(repo, "HEAD", "dir/a.txt").unwrap();
    assert_eq!(content, TreeEntry::File(b"version = 1.2\n".to_vec()));

    assert_eq!(
        ShellBackend::read_blob(repo, "HEAD", "dir").unwrap(),
        TreeEntry::NotRegular
    );
    assert_eq!(
        ShellBackend::read_blob(repo, "HEAD", "missing.txt").unwrap(),
        TreeEntry::Absent
    );
}

#[test]
fn test_uncommitted_changes_backends_agree() {
    let temp = temp_dir();
    let repo = temp.path();
    init_repo(repo);
    commit_file(repo, "a.txt", "1.2\n", "initial");

    assert!(!GixBackend::has_uncommitted_changes(repo).unwrap());
    assert!(!ShellBackend::has_uncommitted_changes(repo).unwrap());

    std::fs::write(repo.join("a.txt"), "1.3\n").unwrap();
    git(repo, &["add", "a.txt"]);
    assert!(GixBackend::has_uncommitted_changes(repo).unwrap());
    assert!(ShellBackend::has_uncommitted_changes(repo).unwrap());

    ShellBackend::restore(repo, &["a.txt".to_string()]).unwrap();
    assert!(!GixBackend::has_uncommitted_changes(repo).unwrap());
    assert_eq!(std::fs::read_to_string(repo.join("a.txt")).unwrap(), "1.2\n");
}
