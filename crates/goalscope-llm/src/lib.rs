// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language-model adapters for Goalscope.
//!
//! [`ChatClient`] implements [`CompletionProvider`](goalscope_core::CompletionProvider)
//! for OpenAI-compatible chat-completions APIs (Groq by default) and
//! [`HttpEmbedder`] implements [`EmbeddingAdapter`](goalscope_core::EmbeddingAdapter)
//! for `/embeddings` endpoints. [`AnswerGenerator`] owns the retry and
//! model-fallback policy on top of any provider.

pub mod client;
pub mod embedder;
pub mod generator;
pub mod types;

pub use client::ChatClient;
pub use embedder::HttpEmbedder;
pub use generator::{AnswerGenerator, GeneratedAnswer, RetryPolicy, UNAVAILABLE_MESSAGE};
