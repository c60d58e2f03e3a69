// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Goalscope.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `GOALSCOPE_*` environment overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use goalscope_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("alpha: {}", config.search.alpha);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::GoalscopeConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `GoalscopeConfig` or every diagnostic found.
pub fn load_and_validate() -> Result<GoalscopeConfig, Vec<ConfigError>> {
    let config = loader::load_config()
        .map_err(|err| diagnostic::figment_to_config_errors(err, &collect_toml_sources()))?;
    validation::validate_config(&config)?;
    tracing::debug!(corpus = %config.corpus.path, "configuration loaded");
    Ok(config)
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<GoalscopeConfig, Vec<ConfigError>> {
    let config = loader::load_config_from_path(path).map_err(|err| {
        let sources = std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default();
        diagnostic::figment_to_config_errors(err, &sources)
    })?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<GoalscopeConfig, Vec<ConfigError>> {
    let config = loader::load_config_from_str(toml_content).map_err(|err| {
        let sources = vec![("<inline>".to_string(), toml_content.to_string())];
        diagnostic::figment_to_config_errors(err, &sources)
    })?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Read every config file in the hierarchy that exists, for span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.into());

    [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG_PATH.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
