// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid retrieval for Goalscope.
//!
//! Goals are ranked by blending a normalized vector-similarity score with a
//! lexical score that understands owner names, colloquial health terms, and
//! department names. A secondary admission tier rescues records with strong
//! lexical evidence that the embedding model missed.

pub mod engine;
pub mod index;
pub mod keyword;
pub mod ranker;
pub mod store;
pub mod vocabulary;

pub use engine::SearchEngine;
pub use index::{FlatIndex, normalize_score};
pub use keyword::{KeywordScorer, QueryTerms, tokenize};
pub use ranker::{HybridRanker, RankFeedback, Ranking, RankingParams, hybrid_score};
pub use store::{IndexStats, QualityReport, RecordStore};
