// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait; the async ones use
//! `#[async_trait]` so they can sit behind `Arc<dyn _>`.

pub mod adapter;
pub mod embedding;
pub mod provider;
pub mod retriever;

pub use adapter::PluginAdapter;
pub use embedding::EmbeddingAdapter;
pub use provider::CompletionProvider;
pub use retriever::VectorRetriever;
