// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `goalscope config` - print the effective configuration.

use goalscope_config::GoalscopeConfig;
use goalscope_core::GoalscopeError;

const REDACTED: &str = "[REDACTED]";

pub fn run_config(config: &GoalscopeConfig) -> Result<(), GoalscopeError> {
    print!("{}", render(config)?);
    Ok(())
}

/// TOML for `config` with API keys masked.
fn render(config: &GoalscopeConfig) -> Result<String, GoalscopeError> {
    let mut shown = config.clone();
    if shown.generator.api_key.is_some() {
        shown.generator.api_key = Some(REDACTED.to_string());
    }
    if shown.embedding.api_key.is_some() {
        shown.embedding.api_key = Some(REDACTED.to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| GoalscopeError::Internal(format!("failed to render configuration: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_keys_are_redacted() {
        let config = goalscope_config::load_and_validate_str(
            r#"
[generator]
api_key = "gsk-secret"

[embedding]
endpoint = "http://localhost:9000/v1/embeddings"
api_key = "emb-secret"
"#,
        )
        .unwrap();
        let rendered = render(&config).unwrap();
        assert!(!rendered.contains("gsk-secret"));
        assert!(!rendered.contains("emb-secret"));
        assert_eq!(rendered.matches(REDACTED).count(), 2);
    }

    #[test]
    fn rendered_config_round_trips() {
        let config = goalscope_config::load_and_validate_str("[search]\nalpha = 0.4\n").unwrap();
        let rendered = render(&config).unwrap();
        let reparsed = goalscope_config::load_and_validate_str(&rendered).unwrap();
        assert_eq!(reparsed.search.alpha, 0.4);
        assert!(reparsed.generator.api_key.is_none());
    }
}
