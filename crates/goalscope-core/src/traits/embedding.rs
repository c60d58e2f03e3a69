// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding adapter trait for query embedding.

use async_trait::async_trait;

use crate::error::GoalscopeError;
use crate::traits::adapter::PluginAdapter;

/// Adapter that turns query text into a vector for the retriever.
///
/// The embedding model itself is an external collaborator; implementations
/// only move text in and floats out.
#[async_trait]
pub trait EmbeddingAdapter: PluginAdapter {
    /// Embeds a single query string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GoalscopeError>;
}
