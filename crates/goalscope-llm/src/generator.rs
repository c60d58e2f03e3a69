// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer generation with per-model retry and ordered model fallback.
//!
//! Models are tried in configured order. Within a model, transport failures
//! and timeouts are retried up to `max_retries` attempts with exponential
//! backoff; a non-success status abandons the model at once. When every
//! model is exhausted the caller gets [`GeneratedAnswer::Unavailable`],
//! never an error.

use std::sync::Arc;
use std::time::Duration;

use goalscope_config::model::GeneratorConfig;
use goalscope_core::traits::CompletionProvider;
use goalscope_core::types::CompletionRequest;
use goalscope_core::GoalscopeError;
use serde::Serialize;
use tracing::{info, warn};

/// Shown to the user when no model produced an answer.
pub const UNAVAILABLE_MESSAGE: &str =
    "Sorry, AI service is temporarily unavailable. Please try again later.";

/// Longest wait between two attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GeneratedAnswer {
    Answer { text: String, model: String },
    Unavailable,
}

impl GeneratedAnswer {
    /// Text to show the user.
    pub fn text(&self) -> &str {
        match self {
            Self::Answer { text, .. } => text,
            Self::Unavailable => UNAVAILABLE_MESSAGE,
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Answer { model, .. } => Some(model),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Answer { .. })
    }
}

/// Models, attempts, and timing for [`AnswerGenerator`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub models: Vec<String>,
    /// Attempts per model, at least 1.
    pub max_retries: u32,
    pub attempt_timeout: Duration,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    /// Wait after failed attempt `attempt` (0-based): `base * 2^attempt`, capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.backoff_base.checked_mul(factor))
            .map_or(MAX_BACKOFF, |d| d.min(MAX_BACKOFF))
    }
}

impl From<&GeneratorConfig> for RetryPolicy {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            models: config.models.clone(),
            max_retries: config.max_retries.max(1),
            attempt_timeout: Duration::from_secs(config.attempt_timeout_secs),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        }
    }
}

/// How one attempt ended when it did not produce an answer.
enum AttemptFailure {
    /// Worth another attempt on the same model.
    Retry(GoalscopeError),
    /// Give up on this model.
    Abandon(GoalscopeError),
}

pub struct AnswerGenerator {
    provider: Arc<dyn CompletionProvider>,
    policy: RetryPolicy,
    max_tokens: u32,
    temperature: f32,
}

impl AnswerGenerator {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        policy: RetryPolicy,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            policy,
            max_tokens,
            temperature,
        }
    }

    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &GeneratorConfig) -> Self {
        Self::new(
            provider,
            RetryPolicy::from(config),
            config.max_tokens,
            config.temperature,
        )
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Produce an answer for `prompt`, or [`GeneratedAnswer::Unavailable`].
    pub async fn generate(&self, system_prompt: &str, prompt: &str) -> GeneratedAnswer {
        for (position, model) in self.policy.models.iter().enumerate() {
            if position > 0 {
                metrics::counter!("goalscope_generator_fallbacks_total").increment(1);
                info!(model = %model, "falling back to next model");
            }

            for attempt in 0..self.policy.max_retries {
                match self.attempt(model, system_prompt, prompt).await {
                    Ok(text) => {
                        metrics::counter!(
                            "goalscope_generator_attempts_total",
                            "outcome" => "success"
                        )
                        .increment(1);
                        info!(model = %model, attempt, "answer generated");
                        return GeneratedAnswer::Answer {
                            text,
                            model: model.clone(),
                        };
                    }
                    Err(AttemptFailure::Abandon(e)) => {
                        metrics::counter!(
                            "goalscope_generator_attempts_total",
                            "outcome" => "status"
                        )
                        .increment(1);
                        warn!(model = %model, attempt, error = %e, "model rejected request");
                        break;
                    }
                    Err(AttemptFailure::Retry(e)) => {
                        metrics::counter!(
                            "goalscope_generator_attempts_total",
                            "outcome" => "transient"
                        )
                        .increment(1);
                        let last = attempt + 1 == self.policy.max_retries;
                        warn!(model = %model, attempt, error = %e, last, "generation attempt failed");
                        if !last {
                            tokio::time::sleep(self.policy.backoff(attempt)).await;
                        }
                    }
                }
            }
        }

        metrics::counter!("goalscope_generator_unavailable_total").increment(1);
        warn!(models = self.policy.models.len(), "all models exhausted");
        GeneratedAnswer::Unavailable
    }

    async fn attempt(
        &self,
        model: &str,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<String, AttemptFailure> {
        let request = CompletionRequest {
            model: model.to_string(),
            system_prompt: Some(system_prompt.to_string()),
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let timeout = self.policy.attempt_timeout;
        match tokio::time::timeout(timeout, self.provider.complete(request)).await {
            Err(_) => Err(AttemptFailure::Retry(GoalscopeError::Timeout { duration: timeout })),
            Ok(Err(e @ GoalscopeError::ProviderStatus { .. })) => Err(AttemptFailure::Abandon(e)),
            Ok(Err(e)) => Err(AttemptFailure::Retry(e)),
            Ok(Ok(response)) => {
                let text = response.content.trim();
                if text.is_empty() {
                    Err(AttemptFailure::Retry(GoalscopeError::Provider {
                        message: "model returned an empty answer".into(),
                        source: None,
                    }))
                } else {
                    Ok(text.to_string())
                }
            }
        }
    }
}
