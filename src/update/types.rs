// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Value types shared by the updater and the pipeline.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::ConfigError;

/// Files added or modified on a branch since it left main.
///
/// Ordered lexicographically, so logs and staged paths are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet(BTreeSet<String>);

impl ChangeSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The literal pair being swapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    old: String,
    new: String,
}

impl Substitution {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `old` is empty.
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Result<Self, ConfigError> {
        let old = old.into();
        if old.is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "update".to_string(),
                key: "old_value".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(Self {
            old,
            new: new.into(),
        })
    }

    #[must_use]
    pub fn old(&self) -> &str {
        &self.old
    }

    #[must_use]
    pub fn new_value(&self) -> &str {
        &self.new
    }

    /// Fill `{old}`, `{new}` and `{branch}` in a commit message template.
    #[must_use]
    pub fn commit_message(&self, template: &str, branch: &str) -> String {
        template
            .replace("{old}", &self.old)
            .replace("{new}", &self.new)
            .replace("{branch}", branch)
    }
}

/// Why a path in the change set was not examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Path no longer exists.
    Missing,
    /// Directory, symlink, submodule or other non-regular entry.
    NotRegularFile,
    /// Matched an exclude glob.
    Excluded,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::NotRegularFile => write!(f, "not a regular file"),
            Self::Excluded => write!(f, "excluded"),
        }
    }
}

/// Result for one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum FileOutcome {
    Updated,
    Unchanged,
    Skipped { reason: SkipReason },
    Errored { error: String },
}

/// A path and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Per-branch totals from one updater run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub errored: usize,
    /// Paths whose content changed, in change set order.
    pub updated_paths: Vec<String>,
    pub files: Vec<FileReport>,
}

impl UpdateReport {
    pub(crate) fn record(&mut self, path: &str, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Updated => {
                self.updated += 1;
                self.updated_paths.push(path.to_string());
            }
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Errored { .. } => self.errored += 1,
        }
        self.files.push(FileReport {
            path: path.to_string(),
            outcome,
        });
    }

    /// Outcome recorded for `path`, if it was in the change set.
    #[must_use]
    pub fn outcome(&self, path: &str) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|file| file.path == path)
            .map(|file| &file.outcome)
    }
}
