// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Goalscope.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use goalscope_core::ScoreScale;
use serde::{Deserialize, Serialize};

/// Top-level Goalscope configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GoalscopeConfig {
    /// Where the ingested goal corpus lives.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Hybrid ranking parameters.
    #[serde(default)]
    pub search: SearchConfig,

    /// Query embedding endpoint.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Answer generation settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Corpus location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    /// Path to the JSON goal export produced by ingestion.
    #[serde(default = "default_corpus_path")]
    pub path: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

fn default_corpus_path() -> String {
    "data/goals.json".to_string()
}

/// Hybrid ranking configuration.
///
/// Both tier thresholds are caller-tunable; there is no single authoritative
/// primary threshold.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Weight of the semantic score in the blend (0.2 = 20% semantic, 80% keyword).
    #[serde(default = "default_alpha")]
    pub alpha: f32,

    /// Minimum hybrid score for the primary tier.
    #[serde(default = "default_primary_threshold")]
    pub primary_threshold: f32,

    /// Minimum hybrid score for the secondary (keyword rescue) tier.
    #[serde(default = "default_secondary_threshold")]
    pub secondary_threshold: f32,

    /// Minimum keyword score for the secondary tier.
    #[serde(default = "default_secondary_keyword_floor")]
    pub secondary_keyword_floor: f32,

    /// Number of nearest neighbors requested from the retriever.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// How raw retriever scores are read before normalization.
    #[serde(default)]
    pub score_scale: ScoreScale,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            primary_threshold: default_primary_threshold(),
            secondary_threshold: default_secondary_threshold(),
            secondary_keyword_floor: default_secondary_keyword_floor(),
            top_k: default_top_k(),
            score_scale: ScoreScale::default(),
        }
    }
}

fn default_alpha() -> f32 {
    0.2
}

fn default_primary_threshold() -> f32 {
    0.1
}

fn default_secondary_threshold() -> f32 {
    0.05
}

fn default_secondary_keyword_floor() -> f32 {
    0.1
}

fn default_top_k() -> usize {
    50
}

/// Query embedding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingConfig {
    /// OpenAI-compatible `/embeddings` URL. `None` runs in lexical-only mode.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Embedding model name; must match the model the corpus was embedded with.
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// API key for the embedding endpoint, if it requires one.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_embedding_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: default_embedding_model(),
            api_key: None,
            timeout_secs: default_embedding_timeout_secs(),
        }
    }
}

fn default_embedding_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_embedding_timeout_secs() -> u64 {
    30
}

/// Answer generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// OpenAI-compatible chat completions URL.
    #[serde(default = "default_generator_endpoint")]
    pub endpoint: String,

    /// API key. `None` requires the `GROQ_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Models tried in order; a model is abandoned on its first non-success response.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Maximum tokens to generate per answer.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Attempts per model before falling back to the next one.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Timeout applied to each individual attempt.
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,

    /// First backoff delay; doubles after each failed attempt.
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Number of top-ranked goals rendered into the prompt context.
    #[serde(default = "default_max_context_records")]
    pub max_context_records: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_generator_endpoint(),
            api_key: None,
            models: default_models(),
            max_tokens: default_max_tokens(),
            max_retries: default_max_retries(),
            temperature: default_temperature(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            backoff_base_ms: default_backoff_base_ms(),
            max_context_records: default_max_context_records(),
        }
    }
}

fn default_generator_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "llama-3.3-70b-versatile".to_string(),
        "mixtral-8x7b-32768".to_string(),
        "llama-3.1-8b-instant".to_string(),
    ]
}

fn default_max_tokens() -> u32 {
    1200
}

fn default_max_retries() -> u32 {
    3
}

fn default_temperature() -> f32 {
    0.1
}

fn default_attempt_timeout_secs() -> u64 {
    30
}

fn default_backoff_base_ms() -> u64 {
    1000
}

fn default_max_context_records() -> usize {
    5
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
