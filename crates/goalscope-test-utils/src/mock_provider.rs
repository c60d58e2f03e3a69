// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` by replaying a script of
//! outcomes, so retry and fallback paths can be driven without a network.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use goalscope_core::GoalscopeError;
use goalscope_core::traits::{CompletionProvider, PluginAdapter};
use goalscope_core::types::{CompletionRequest, CompletionResponse};

/// What the provider does on one call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOutcome {
    /// Answer with this text.
    Reply(String),
    /// Fail with a non-success HTTP status.
    Status(u16),
    /// Fail as if the connection dropped.
    Transport,
    /// Never answer.
    Hang,
}

impl MockOutcome {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply(text.into())
    }
}

/// A scripted provider.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" reply is returned.
pub struct MockProvider {
    script: Arc<Mutex<VecDeque<MockOutcome>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::with_script(Vec::new())
    }

    pub fn with_script(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue plain replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_script(responses.into_iter().map(MockOutcome::Reply).collect())
    }

    pub async fn push(&self, outcome: MockOutcome) {
        self.script.lock().await.push_back(outcome);
    }

    /// Every request received so far, in order.
    pub async fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().await.clone()
    }

    /// The model named by each request received so far.
    pub async fn models_called(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .map(|r| r.model.clone())
            .collect()
    }

    async fn next_outcome(&self) -> MockOutcome {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockOutcome::reply("mock response"))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GoalscopeError> {
        let model = request.model.clone();
        self.calls.lock().await.push(request);

        match self.next_outcome().await {
            MockOutcome::Reply(content) => Ok(CompletionResponse { content, model }),
            MockOutcome::Status(status) => Err(GoalscopeError::ProviderStatus {
                status,
                message: "mock status".into(),
            }),
            MockOutcome::Transport => Err(GoalscopeError::Provider {
                message: "mock connection reset".into(),
                source: None,
            }),
            MockOutcome::Hang => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            system_prompt: None,
            prompt: "question".to_string(),
            max_tokens: 100,
            temperature: 0.1,
        }
    }

    #[tokio::test]
    async fn default_reply_when_script_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request("m")).await.unwrap();
        assert_eq!(resp.content, "mock response");
        assert_eq!(resp.model, "m");
    }

    #[tokio::test]
    async fn script_is_replayed_in_order() {
        let provider = MockProvider::with_script(vec![
            MockOutcome::Status(503),
            MockOutcome::Transport,
            MockOutcome::reply("third"),
        ]);

        let err = provider.complete(request("a")).await.unwrap_err();
        assert!(matches!(err, GoalscopeError::ProviderStatus { status: 503, .. }));
        let err = provider.complete(request("b")).await.unwrap_err();
        assert!(matches!(err, GoalscopeError::Provider { .. }));
        assert_eq!(provider.complete(request("c")).await.unwrap().content, "third");

        assert_eq!(provider.models_called().await, vec!["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn hang_never_resolves() {
        let provider = MockProvider::with_script(vec![MockOutcome::Hang]);
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            provider.complete(request("m")),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn push_after_construction() {
        let provider = MockProvider::new();
        provider.push(MockOutcome::reply("dynamic")).await;
        assert_eq!(provider.complete(request("m")).await.unwrap().content, "dynamic");
        assert_eq!(provider.calls().await.len(), 1);
    }
}
