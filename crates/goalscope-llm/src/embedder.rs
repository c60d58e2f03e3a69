// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query embedding over an OpenAI-compatible `/embeddings` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use goalscope_config::model::EmbeddingConfig;
use goalscope_core::GoalscopeError;
use goalscope_core::traits::{EmbeddingAdapter, PluginAdapter};
use tracing::debug;

use crate::client::default_headers;
use crate::types::{EmbeddingRequest, EmbeddingResponse, error_message};

/// Embeds queries with the same model the corpus was embedded with.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl HttpEmbedder {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, GoalscopeError> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers(api_key)?)
            .timeout(timeout)
            .build()
            .map_err(|e| GoalscopeError::Embedding {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    /// `None` when no endpoint is configured (lexical-only mode).
    pub fn from_config(config: &EmbeddingConfig) -> Result<Option<Self>, GoalscopeError> {
        let Some(endpoint) = config.endpoint.as_deref() else {
            return Ok(None);
        };
        Self::new(
            endpoint,
            config.model.clone(),
            config.api_key.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn failure(message: String, source: Option<Box<dyn std::error::Error + Send + Sync>>) -> GoalscopeError {
        GoalscopeError::Embedding { message, source }
    }
}

impl PluginAdapter for HttpEmbedder {
    fn name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingAdapter for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GoalscopeError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::failure(format!("HTTP request failed: {e}"), Some(Box::new(e))))?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "embedding response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::failure(
                format!("embedding endpoint returned {status}: {}", error_message(&body)),
                None,
            ));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Self::failure(format!("failed to parse embedding response: {e}"), Some(Box::new(e))))?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Self::failure("embedding response contained no vector".into(), None))?;
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn embedder(server: &MockServer) -> HttpEmbedder {
        HttpEmbedder::new(
            format!("{}/v1/embeddings", server.uri()),
            "all-MiniLM-L6-v2",
            None,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn embed_returns_first_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(body_partial_json(serde_json::json!({
                "model": "all-MiniLM-L6-v2",
                "input": "goals at risk"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "data": [{"object": "embedding", "index": 0, "embedding": [0.1, 0.2, 0.3]}]
            })))
            .mount(&server)
            .await;

        let v = embedder(&server).embed("goals at risk").await.unwrap();
        assert_eq!(v, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn error_status_is_embedding_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
            .mount(&server)
            .await;

        let err = embedder(&server).embed("x").await.unwrap_err();
        assert!(matches!(err, GoalscopeError::Embedding { .. }));
        assert!(err.to_string().contains("embedding"), "got: {err}");
    }

    #[tokio::test]
    async fn empty_data_is_embedding_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&server)
            .await;

        assert!(embedder(&server).embed("x").await.is_err());
    }

    #[test]
    fn no_endpoint_means_no_embedder() {
        let config = EmbeddingConfig::default();
        assert!(HttpEmbedder::from_config(&config).unwrap().is_none());
    }
}
