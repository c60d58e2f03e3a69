// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock embedder and retriever.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use goalscope_core::GoalscopeError;
use goalscope_core::traits::{EmbeddingAdapter, PluginAdapter, VectorRetriever};
use goalscope_core::types::{Neighbor, ScoreScale};

/// Returns the same vector for every text, or always fails.
pub struct MockEmbedder {
    vector: Option<Vec<f32>>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl MockEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector: Some(vector),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            vector: None,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Texts embedded so far.
    pub async fn seen(&self) -> Vec<String> {
        self.seen.lock().await.clone()
    }
}

impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }
}

#[async_trait]
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GoalscopeError> {
        self.seen.lock().await.push(text.to_string());
        self.vector.clone().ok_or_else(|| GoalscopeError::Embedding {
            message: "mock embedder failure".into(),
            source: None,
        })
    }
}

/// Returns a fixed neighbor list, truncated to `k`.
pub struct MockRetriever {
    neighbors: Vec<Neighbor>,
    scale: ScoreScale,
}

impl MockRetriever {
    pub fn new(neighbors: Vec<Neighbor>, scale: ScoreScale) -> Self {
        Self { neighbors, scale }
    }
}

impl PluginAdapter for MockRetriever {
    fn name(&self) -> &str {
        "mock-retriever"
    }
}

#[async_trait]
impl VectorRetriever for MockRetriever {
    async fn search(&self, _query: &[f32], k: usize) -> Result<Vec<Neighbor>, GoalscopeError> {
        Ok(self.neighbors.iter().take(k).copied().collect())
    }

    fn scale(&self) -> ScoreScale {
        self.scale
    }
}
