// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scoped file updater.
//!
//! Rewrites the old literal only inside the paths of a [`ChangeSet`].
//!
//! ```text
//! ChangeSet ---> excluded? --yes--> Skipped(excluded)
//!                   | no
//!                   v
//!              FileSource::read
//!               |      |       \
//!           Missing  NotRegular  Text ---> old absent? --yes--> Unchanged
//!               |      |                      | no
//!               v      v                      v
//!            Skipped  Skipped        replace (Substring | WholeToken)
//!                                             |
//!                           same content? ----+---- differs
//!                               |                      |
//!                           Unchanged     apply: FileStore::write -> Updated
//!                                         preview: log "would update" -> Updated
//! ```
//!
//! Read and write failures become `Errored` for that path only.

pub mod store;
pub mod types;


pub use store::{CommitSnapshot, FileSource, FileStore, SourceFile, WorkTreeFiles};
pub use types::{ChangeSet, FileOutcome, FileReport, SkipReason, Substitution, UpdateReport};

use tracing::{debug, info, warn};
use wax::{Glob, Program};

use crate::config::types::MatchMode;
use crate::error::{ConfigError, FsError};

/// Compiled exclude patterns.
#[derive(Debug, Default)]
pub struct ExcludeSet<'p> {
    globs: Vec<Glob<'p>>,
}

impl<'p> ExcludeSet<'p> {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a pattern that is not a glob.
    pub fn new(patterns: &'p [String]) -> Result<Self, ConfigError> {
        let globs = patterns
            .iter()
            .map(|pattern| {
                Glob::new(pattern).map_err(|e| ConfigError::InvalidValue {
                    section: "update".to_string(),
                    key: "exclude".to_string(),
                    message: format!("'{pattern}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { globs })
    }

    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.globs.iter().any(|glob| glob.is_match(path))
    }
}

/// Replace occurrences of `old` in `content` according to `mode`.
///
/// Returns `None` when nothing would be replaced.
#[must_use]
pub fn replace_literal(content: &str, old: &str, new: &str, mode: MatchMode) -> Option<String> {
    if old.is_empty() || !content.contains(old) {
        return None;
    }
    match mode {
        MatchMode::Substring => Some(content.replace(old, new)),
        MatchMode::WholeToken => replace_whole_tokens(content, old, new),
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn replace_whole_tokens(content: &str, old: &str, new: &str) -> Option<String> {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    let mut replaced = false;

    for (start, _) in content.match_indices(old) {
        let end = start + old.len();
        let glued_before = content[..start].chars().next_back().is_some_and(is_token_char);
        let glued_after = content[end..].chars().next().is_some_and(is_token_char);
        if glued_before || glued_after {
            continue;
        }
        out.push_str(&content[last..start]);
        out.push_str(new);
        last = end;
        replaced = true;
    }

    replaced.then(|| {
        out.push_str(&content[last..]);
        out
    })
}

enum Plan {
    Skip(SkipReason),
    Keep,
    Rewrite(String),
}

/// Applies one [`Substitution`] to the paths of a change set.
#[derive(Debug)]
pub struct ScopedFileUpdater<'a> {
    substitution: &'a Substitution,
    mode: MatchMode,
    exclude: ExcludeSet<'a>,
}

impl<'a> ScopedFileUpdater<'a> {
    #[must_use]
    pub fn new(substitution: &'a Substitution, mode: MatchMode, exclude: ExcludeSet<'a>) -> Self {
        Self {
            substitution,
            mode,
            exclude,
        }
    }

    #[must_use]
    pub const fn substitution(&self) -> &Substitution {
        self.substitution
    }

    fn plan(&self, source: &impl FileSource, path: &str) -> Result<Plan, FsError> {
        if self.exclude.is_excluded(path) {
            return Ok(Plan::Skip(SkipReason::Excluded));
        }
        let content = match source.read(path)? {
            SourceFile::Missing => return Ok(Plan::Skip(SkipReason::Missing)),
            SourceFile::NotRegular => return Ok(Plan::Skip(SkipReason::NotRegularFile)),
            SourceFile::Text(content) => content,
        };
        let rewritten = replace_literal(
            &content,
            self.substitution.old(),
            self.substitution.new_value(),
            self.mode,
        );
        Ok(match rewritten {
            Some(updated) if updated != content => Plan::Rewrite(updated),
            _ => Plan::Keep,
        })
    }

    /// Rewrite matching files in `store`.
    pub fn apply(&self, store: &mut impl FileStore, changes: &ChangeSet) -> UpdateReport {
        let mut report = UpdateReport::default();
        for path in changes.iter() {
            let outcome = match self.plan(&*store, path) {
                Ok(Plan::Rewrite(content)) => match store.write(path, &content) {
                    Ok(()) => {
                        info!(path, "updated");
                        FileOutcome::Updated
                    }
                    Err(e) => errored(path, &e),
                },
                Ok(plan) => settled(path, plan),
                Err(e) => errored(path, &e),
            };
            report.record(path, outcome);
        }
        report
    }

    /// Report what [`apply`](Self::apply) would do without writing anything.
    pub fn preview(&self, source: &impl FileSource, changes: &ChangeSet) -> UpdateReport {
        let mut report = UpdateReport::default();
        for path in changes.iter() {
            let outcome = match self.plan(source, path) {
                Ok(Plan::Rewrite(_)) => {
                    info!(
                        path,
                        old = self.substitution.old(),
                        new = self.substitution.new_value(),
                        "would update"
                    );
                    FileOutcome::Updated
                }
                Ok(plan) => settled(path, plan),
                Err(e) => errored(path, &e),
            };
            report.record(path, outcome);
        }
        report
    }
}

fn settled(path: &str, plan: Plan) -> FileOutcome {
    match plan {
        Plan::Skip(reason) => {
            debug!(path, %reason, "skipped");
            FileOutcome::Skipped { reason }
        }
        Plan::Keep | Plan::Rewrite(_) => {
            debug!(path, "unchanged");
            FileOutcome::Unchanged
        }
    }
}

fn errored(path: &str, err: &FsError) -> FileOutcome {
    warn!(path, error = %err, "failed to update file");
    FileOutcome::Errored {
        error: err.to_string(),
    }
}
