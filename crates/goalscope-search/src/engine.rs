// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query entry point for retrieval.
//!
//! With an embedder and retriever wired in, the engine embeds the query,
//! fetches the nearest `top_k` goals, normalizes their scores, and hands
//! them to the ranker. Without them it runs lexical-only: every goal is a
//! candidate with a semantic score of 0 and the ranking is cut to `top_k`.

use std::sync::Arc;
use std::time::Instant;

use goalscope_config::model::SearchConfig;
use goalscope_core::{EmbeddingAdapter, GoalscopeError, VectorRetriever};
use tracing::{debug, info, warn};

use crate::ranker::{HybridRanker, Ranking, RankingParams};
use crate::store::{IndexStats, RecordStore};

/// Semantic half of the engine.
struct Semantic {
    embedder: Arc<dyn EmbeddingAdapter>,
    retriever: Arc<dyn VectorRetriever>,
}

pub struct SearchEngine {
    store: Arc<RecordStore>,
    semantic: Option<Semantic>,
    ranker: HybridRanker,
    top_k: usize,
}

impl SearchEngine {
    /// A lexical-only engine over `store`.
    pub fn new(store: Arc<RecordStore>, params: RankingParams, top_k: usize) -> Self {
        Self {
            store,
            semantic: None,
            ranker: HybridRanker::new(params),
            top_k: top_k.max(1),
        }
    }

    pub fn from_config(store: Arc<RecordStore>, config: &SearchConfig) -> Self {
        Self::new(store, RankingParams::from(config), config.top_k)
    }

    /// Enable vector retrieval.
    pub fn with_semantic(
        mut self,
        embedder: Arc<dyn EmbeddingAdapter>,
        retriever: Arc<dyn VectorRetriever>,
    ) -> Self {
        self.semantic = Some(Semantic {
            embedder,
            retriever,
        });
        self
    }

    pub fn is_semantic(&self) -> bool {
        self.semantic.is_some()
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn stats(&self) -> IndexStats {
        let dimension = self.semantic.as_ref().and_then(|s| s.retriever.dimension());
        let model = self.semantic.as_ref().map(|s| s.embedder.name());
        self.store.stats(dimension, model)
    }

    /// Rank goals for `query`.
    ///
    /// An empty ranking is a normal outcome. Errors mean the search itself
    /// failed: the query could not be embedded or the index rejected it.
    pub async fn search(&self, query: &str) -> Result<Ranking, GoalscopeError> {
        let started = Instant::now();
        let result = self.run(query).await;
        let elapsed = started.elapsed().as_secs_f64();

        match &result {
            Ok(ranking) => {
                let outcome = if ranking.is_empty() { "no_results" } else { "results" };
                metrics::counter!("goalscope_search_queries_total", "outcome" => outcome).increment(1);
                metrics::histogram!("goalscope_search_results").record(ranking.results.len() as f64);
                info!(
                    results = ranking.results.len(),
                    semantic = self.is_semantic(),
                    elapsed_ms = (elapsed * 1000.0) as u64,
                    "search complete"
                );
            }
            Err(e) => {
                metrics::counter!("goalscope_search_queries_total", "outcome" => "error").increment(1);
                warn!(error = %e, "search failed");
            }
        }
        metrics::histogram!("goalscope_search_latency_seconds").record(elapsed);
        result
    }

    async fn run(&self, query: &str) -> Result<Ranking, GoalscopeError> {
        let departments = self.store.known_departments();

        let Some(semantic) = &self.semantic else {
            let mut ranking = self
                .ranker
                .rank(query, self.store.all_candidates(), departments);
            ranking.truncate(self.top_k);
            return Ok(ranking);
        };

        let embedding = semantic.embedder.embed(query).await?;
        let neighbors = semantic.retriever.search(&embedding, self.top_k).await?;
        debug!(neighbors = neighbors.len(), "retrieved nearest goals");

        let candidates = self.store.resolve(&neighbors, semantic.retriever.scale());
        Ok(self.ranker.rank(query, candidates, departments))
    }
}
