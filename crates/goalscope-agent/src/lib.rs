// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question answering over organizational goals.
//!
//! [`QueryPipeline`] runs hybrid search, renders the top results into a
//! prompt, and asks the language model for a summary. [`build_pipeline`]
//! wires it from a [`GoalscopeConfig`](goalscope_config::model::GoalscopeConfig).

pub mod builder;
pub mod pipeline;

pub use builder::{build_pipeline, build_search_engine};
pub use pipeline::{Answer, NO_MATCH_ANSWER, QueryAnswer, QueryPipeline};
