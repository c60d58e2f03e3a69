// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector retriever trait for nearest-neighbor search.

use async_trait::async_trait;

use crate::error::GoalscopeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Neighbor, ScoreScale};

/// Adapter over a nearest-neighbor index of goal embeddings.
///
/// Neighbor indices refer to positions in the record store the index was
/// built from. The caller must tolerate indices that fall outside it.
#[async_trait]
pub trait VectorRetriever: PluginAdapter {
    /// Returns up to `k` neighbors ordered best-first.
    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, GoalscopeError>;

    /// The scale the raw neighbor scores are expressed on.
    fn scale(&self) -> ScoreScale;

    /// Embedding dimension the index was built with, if known.
    fn dimension(&self) -> Option<usize> {
        None
    }
}
