// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for prbump.

use crate::cli::global::GlobalOptions;
use crate::cli::update::UpdateArgs;
use crate::config::loader::ConfigLoader;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::Result;
use crate::git::query;

/// Environment variable prefix (`PRBUMP_GIT__REMOTE`).
pub const ENV_PREFIX: &str = "PRBUMP";

/// Assemble every config source in precedence order.
///
/// # Errors
///
/// Returns a `ConfigError::ParseError` for a malformed `--set` assignment.
pub fn build_config_loader(
    global: &GlobalOptions,
    update: Option<&UpdateArgs>,
) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();

    // Outside a repository there is no repository config; `update` reports
    // the missing repository itself.
    if !global.no_repo_config
        && let Ok(root) = query::work_tree_root(global.repo_dir())
    {
        loader = loader.add_toml_file_optional(root.join(CONFIG_FILE_NAME));
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    let mut overrides = global.to_config_overrides();
    if let Some(args) = update {
        overrides.extend(args.to_config_overrides());
    }
    loader.set_assignments(&overrides)
}

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}
