// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::Silent));
    assert_eq!(LogLevel::from_u8(6), Some(LogLevel::Dump));
    assert_eq!(LogLevel::from_u8(7), None);
    assert!(LogLevel::try_from(9).is_err());
    assert_eq!(u8::from(LogLevel::Debug), 4);
    assert!(LogLevel::Warn < LogLevel::Info);
}

#[test]
fn test_log_level_tracing_mapping() {
    assert_eq!(LogLevel::Silent.to_tracing_level(), None);
    assert_eq!(LogLevel::Warn.to_tracing_level(), Some(Level::WARN));
    assert_eq!(LogLevel::Dump.to_tracing_level(), Some(Level::TRACE));
}

#[test]
fn test_log_level_directives() {
    let directives: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::directives)
        .collect();
    insta::assert_snapshot!(
        directives.join(" | "),
        @"off | error | warn | warn,prbump=info | warn,prbump=debug | warn,prbump=trace | trace"
    );
}

#[test]
fn test_log_level_serde_uses_numbers() {
    let level: LogLevel = serde_json::from_str("5").unwrap();
    assert_eq!(level, LogLevel::Trace);
    assert_eq!(serde_json::to_string(&LogLevel::Info).unwrap(), "3");
    assert_eq!(LogLevel::Info.to_string(), "3");

    let err = serde_json::from_str::<LogLevel>("12").unwrap_err();
    assert!(err.to_string().contains("0-6"), "{err}");
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::Info);
    assert_eq!(config.file_level(), LogLevel::Trace);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}
