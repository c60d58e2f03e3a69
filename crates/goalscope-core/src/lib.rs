// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Goalscope.
//!
//! Provides the goal data model, the shared error type, and the adapter
//! traits behind which the embedding model, the vector index, and the
//! text-generation API sit.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GoalscopeError;
pub use types::{
    CompletionRequest, CompletionResponse, GoalId, GoalRecord, HealthCategory, Kpi, Milestone,
    Neighbor, ScoreScale, ScoredRecord, Tier,
};

pub use traits::{CompletionProvider, EmbeddingAdapter, PluginAdapter, VectorRetriever};
