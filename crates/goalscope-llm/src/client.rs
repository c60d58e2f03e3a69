// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible chat-completions endpoints.
//!
//! Provides [`ChatClient`] which handles request construction and
//! authentication. Each call is a single attempt; retry and model fallback
//! belong to [`crate::AnswerGenerator`].

use std::time::Duration;

use async_trait::async_trait;
use goalscope_config::model::GeneratorConfig;
use goalscope_core::GoalscopeError;
use goalscope_core::traits::{CompletionProvider, PluginAdapter};
use goalscope_core::types::{CompletionRequest, CompletionResponse};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ChatMessage, ChatRequest, ChatResponse, error_message};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Chat-completions client.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    /// Creates a client posting to `endpoint`.
    ///
    /// `api_key` is sent as a bearer token when present. `timeout` bounds a
    /// whole request; the generator applies its own per-attempt timeout too.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, GoalscopeError> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers(api_key)?)
            .timeout(timeout)
            .build()
            .map_err(|e| GoalscopeError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Creates a client from the `[generator]` section.
    ///
    /// # API Key Resolution
    /// 1. `generator.api_key` if set
    /// 2. the `GROQ_API_KEY` environment variable
    /// 3. no key (the provider will most likely answer 401)
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GoalscopeError> {
        let api_key = resolve_api_key(config.api_key.as_deref());
        if api_key.is_none() {
            tracing::warn!("no generator API key configured; answer generation will likely fail");
        }
        Self::new(
            config.endpoint.clone(),
            api_key.as_deref(),
            Duration::from_secs(config.attempt_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one chat request.
    ///
    /// Non-success statuses become [`GoalscopeError::ProviderStatus`];
    /// everything that goes wrong before a status arrives, or while reading
    /// a success body, is [`GoalscopeError::Provider`].
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, GoalscopeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| GoalscopeError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "chat response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GoalscopeError::ProviderStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response.text().await.map_err(|e| GoalscopeError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| GoalscopeError::Provider {
            message: format!("failed to parse chat response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

pub(crate) fn default_headers(api_key: Option<&str>) -> Result<HeaderMap, GoalscopeError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key {
        let value = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| GoalscopeError::Config(format!("invalid API key header value: {e}")))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

fn resolve_api_key(configured: Option<&str>) -> Option<String> {
    configured
        .filter(|k| !k.trim().is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()))
}

impl PluginAdapter for ChatClient {
    fn name(&self) -> &str {
        "openai-chat"
    }
}

#[async_trait]
impl CompletionProvider for ChatClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GoalscopeError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(request.prompt));

        let chat = ChatRequest {
            model: request.model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        let response = self.chat(&chat).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GoalscopeError::Provider {
                message: "chat response contained no message content".into(),
                source: None,
            })?;

        Ok(CompletionResponse {
            content,
            model: response.model.unwrap_or(chat.model),
        })
    }
}
