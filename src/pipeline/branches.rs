// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch list input.
//!
//! ```text
//! ["feature/a", "feature/b"]                  flat array
//! {"branches": ["feature/a", "feature/b"]}    wrapped
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

#[derive(Deserialize)]
#[serde(untagged)]
enum BranchList {
    Flat(Vec<String>),
    Wrapped { branches: Vec<String> },
}

/// Parse a JSON branch list.
///
/// # Errors
///
/// Returns an error for malformed JSON, an unexpected shape, or a list that
/// [`validate_branches`] rejects.
pub fn parse_branches(content: &str) -> Result<Vec<String>> {
    let list: BranchList = serde_json::from_str(content).context(
        "branch list must be a JSON array of names or an object with a 'branches' array",
    )?;
    let branches = match list {
        BranchList::Flat(branches) | BranchList::Wrapped { branches } => branches,
    };
    validate_branches(branches)
}

/// Read and parse a JSON branch list file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_branches(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read branch list {}", path.display()))?;
    parse_branches(&content).with_context(|| format!("invalid branch list {}", path.display()))
}

/// Reject an empty list and blank names.
///
/// # Errors
///
/// Returns an error naming the first offending entry.
pub fn validate_branches(branches: Vec<String>) -> Result<Vec<String>> {
    if branches.is_empty() {
        anyhow::bail!("no branches to process");
    }
    if let Some(index) = branches.iter().position(|name| name.trim().is_empty()) {
        anyhow::bail!("branch name #{} is blank", index + 1);
    }
    Ok(branches)
}
