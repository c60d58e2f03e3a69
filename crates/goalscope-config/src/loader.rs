// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./goalscope.toml` > `~/.config/goalscope/goalscope.toml` >
//! `/etc/goalscope/goalscope.toml` with environment variable overrides via `GOALSCOPE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GoalscopeConfig;

/// System-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/goalscope/goalscope.toml";

/// Local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "goalscope.toml";

/// Sections whose env vars are remapped from `GOALSCOPE_<SECTION>_<KEY>`.
const ENV_SECTIONS: &[&str] = &["corpus", "search", "embedding", "generator", "logging"];

/// Path of the per-user config file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("goalscope").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/goalscope/goalscope.toml` (system-wide)
/// 3. `~/.config/goalscope/goalscope.toml` (user XDG config)
/// 4. `./goalscope.toml` (local directory)
/// 5. `GOALSCOPE_*` environment variables
pub fn load_config() -> Result<GoalscopeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<GoalscopeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GoalscopeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GoalscopeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GoalscopeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GoalscopeConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `GOALSCOPE_SEARCH_PRIMARY_THRESHOLD` must map to
/// `search.primary_threshold`, not `search.primary.threshold`.
fn env_provider() -> Env {
    Env::prefixed("GOALSCOPE_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name onto a dotted config key.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
