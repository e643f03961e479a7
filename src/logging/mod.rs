// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging infrastructure using the `tracing` ecosystem.
//!
//! ```text
//! init_logging(&LogConfig)
//!        |
//!        v
//!    registry
//!    |          |
//!    v          v
//! console     file (optional)
//! stderr      JSON lines, non_blocking
//! EnvFilter   EnvFilter, span close events
//!        |
//!        v
//!    LogGuard (flush on drop)
//!
//! LogLevel:  0=Silent 1=Error 2=Warn 3=Info
//!            4=Debug  5=Trace 6=Dump (gix included)
//! ```
//!
//! Stdout is never written to, it carries the tally line and the `--json`
//! report.

use std::fmt;
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::{ConfigError, Result};

/// Verbosity on the 0-6 scale used by `-l`, `--file-log-level` and the
/// `[global]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum LogLevel {
    Silent = 0,
    Error = 1,
    /// Aborted branches and skipped restores.
    Warn = 2,
    /// One line per pipeline stage.
    #[default]
    Info = 3,
    /// Every git invocation and per-file outcome.
    Debug = 4,
    Trace = 5,
    /// Trace with dependency crates unfiltered.
    Dump = 6,
}

impl LogLevel {
    const ALL: [Self; 7] = [
        Self::Silent,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
        Self::Dump,
    ];

    /// Level for a number on the 0-6 scale.
    #[must_use]
    pub fn from_u8(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level)).copied()
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Matching `tracing` level, `None` when silent.
    #[must_use]
    pub const fn to_tracing_level(self) -> Option<Level> {
        match self {
            Self::Silent => None,
            Self::Error => Some(Level::ERROR),
            Self::Warn => Some(Level::WARN),
            Self::Info => Some(Level::INFO),
            Self::Debug => Some(Level::DEBUG),
            Self::Trace | Self::Dump => Some(Level::TRACE),
        }
    }

    /// `EnvFilter` directives. Below `Dump`, other crates stay at `warn`.
    #[must_use]
    pub const fn directives(self) -> &'static str {
        match self {
            Self::Silent => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "warn,prbump=info",
            Self::Debug => "warn,prbump=debug",
            Self::Trace => "warn,prbump=trace",
            Self::Dump => "trace",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> std::result::Result<Self, ConfigError> {
        Self::from_u8(value).ok_or_else(|| ConfigError::InvalidValue {
            section: "global".to_string(),
            key: "log_level".to_string(),
            message: format!("log level must be 0-6, got {value}"),
        })
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Configuration for [`init_logging`].
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::Trace)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file))]
    log_file: Option<String>,
    #[builder(setters(name = with_show_target), default = false)]
    show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    /// Whether console lines carry the module path.
    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.show_target
    }
}

/// Keeps the file writer thread alive; pending lines are flushed on drop.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn console_layer(config: &LogConfig) -> BoxedLayer {
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target())
        .with_ansi(true)
        .with_filter(config.console_level().filter())
        .boxed()
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("failed to create log file {}", path.display()))
}

fn file_layer(path: &Path, level: LogLevel) -> Result<(BoxedLayer, WorkerGuard)> {
    let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(writer)
        .with_current_span(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(level.filter())
        .boxed();
    Ok((layer, guard))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
///
/// # Example
///
/// ```no_run
/// use prbump::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::Info)
///     .with_file_level(LogLevel::Debug)
///     .with_log_file("prbump.log".to_string())
///     .build();
///
/// let _guard = init_logging(&config)?;
/// tracing::info!("logging ready");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let mut layers = vec![console_layer(config)];
    let mut file_guard = None;

    if let Some(path) = config.log_file() {
        let (layer, guard) = file_layer(Path::new(path), config.file_level())?;
        layers.push(layer);
        file_guard = Some(guard);
    }

    tracing_subscriber::registry().with(layers).init();

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests;
