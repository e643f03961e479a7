// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional(<repo>/prbump.toml)   [optional]
//!   .add_toml_file(--config)                      [file]
//!   .with_env_prefix("PRBUMP")                    PRBUMP_GIT__REMOTE
//!   .set_assignments(--set, CLI flags)            always wins
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// How a TOML source entered the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `--config FILE`, must exist.
    File,
    /// Repository `prbump.toml`, recorded only when present.
    Optional,
    /// In-memory TOML.
    Inline,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Optional => "optional",
            Self::Inline => "string",
        })
    }
}

/// Builder over every configuration source, in precedence order.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<(SourceKind, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    fn push_file(mut self, path: &Path, kind: SourceKind) -> Self {
        let required = kind == SourceKind::File;
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required || path.is_file() {
            self.sources.push((kind, path.to_path_buf()));
        }
        self
    }

    /// Add a TOML file that must exist when [`build`](Self::build) runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.push_file(path.as_ref(), SourceKind::File)
    }

    /// Add a TOML file that is silently skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.push_file(path.as_ref(), SourceKind::Optional)
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources
            .push((SourceKind::Inline, PathBuf::from("<string>")));
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` environment variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Apply `section.key=value` assignments as overrides.
    ///
    /// Later assignments win over earlier ones for the same key.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ParseError` if an assignment has no `=`, an
    /// empty key, or a key the config crate cannot address.
    pub fn set_assignments<S: AsRef<str>>(mut self, assignments: &[S]) -> Result<Self> {
        for assignment in assignments {
            let (key, value) = parse_assignment(assignment.as_ref())?;
            self.builder = self.builder.set_override(key, value).map_err(|e| {
                ConfigError::ParseError {
                    path: "--set".to_string(),
                    message: format!("{key}: {e}"),
                }
            })?;
        }
        Ok(self)
    }

    /// Merge all sources and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a file is not valid
    /// TOML, a value has the wrong type or an unknown key, or
    /// [`Config::validate`] rejects the merged values.
    pub fn build(self) -> Result<Config> {
        let mut builder = self.builder;
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Sources that contributed a file, in the order they were added.
    #[must_use]
    pub fn loaded_files(&self) -> &[(SourceKind, PathBuf)] {
        &self.sources
    }

    /// One numbered line per loaded file, for debug logging.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, (kind, path))| format!("{}. [{kind}] {}", i + 1, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits `section.key=value` at the first `=`.
fn parse_assignment(assignment: &str) -> std::result::Result<(&str, &str), ConfigError> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(ConfigError::ParseError {
            path: "--set".to_string(),
            message: format!("expected KEY=VALUE, got '{assignment}'"),
        }),
    }
}
