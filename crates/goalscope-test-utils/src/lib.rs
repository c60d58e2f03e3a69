// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Goalscope.
//!
//! Provides mock adapters and a small fixture corpus for fast,
//! deterministic tests without a model server or network access.
//!
//! # Components
//!
//! - [`MockProvider`] - Scripted completion provider that records every call
//! - [`MockEmbedder`] - Fixed-vector embedder
//! - [`MockRetriever`] - Retriever returning canned neighbors
//! - [`sample_corpus`] - Goals covering owners, departments, and health states

pub mod fixtures;
pub mod mock_provider;
pub mod mock_search;

pub use fixtures::sample_corpus;
pub use mock_provider::{MockOutcome, MockProvider};
pub use mock_search::{MockEmbedder, MockRetriever};
