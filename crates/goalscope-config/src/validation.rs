// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as score ranges, threshold ordering, and non-empty model lists.

use crate::diagnostic::ConfigError;
use crate::model::GoalscopeConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &GoalscopeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.corpus.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "corpus.path must not be empty".to_string(),
        });
    }

    let search = &config.search;
    for (key, value) in [
        ("search.alpha", search.alpha),
        ("search.primary_threshold", search.primary_threshold),
        ("search.secondary_threshold", search.secondary_threshold),
        ("search.secondary_keyword_floor", search.secondary_keyword_floor),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be within [0.0, 1.0], got {value}"),
            });
        }
    }

    // A secondary threshold above the primary one would let rescued records
    // outrank primary ones.
    if search.secondary_threshold > search.primary_threshold {
        errors.push(ConfigError::Validation {
            message: format!(
                "search.secondary_threshold ({}) must not exceed search.primary_threshold ({})",
                search.secondary_threshold, search.primary_threshold
            ),
        });
    }

    if search.top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "search.top_k must be at least 1".to_string(),
        });
    }

    if let Some(endpoint) = &config.embedding.endpoint
        && endpoint.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "embedding.endpoint must not be empty when set".to_string(),
        });
    }

    let generator = &config.generator;
    if generator.models.is_empty() {
        errors.push(ConfigError::Validation {
            message: "generator.models must list at least one model".to_string(),
        });
    }

    for (i, model) in generator.models.iter().enumerate() {
        if model.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("generator.models[{i}] must not be empty"),
            });
        }
    }

    if generator.max_retries < 1 {
        errors.push(ConfigError::Validation {
            message: "generator.max_retries must be at least 1".to_string(),
        });
    }

    if generator.max_context_records < 1 {
        errors.push(ConfigError::Validation {
            message: "generator.max_context_records must be at least 1".to_string(),
        });
    }

    if generator.attempt_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "generator.attempt_timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
