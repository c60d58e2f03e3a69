// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire the pipeline's collaborators from configuration.

use std::path::Path;
use std::sync::Arc;

use goalscope_config::model::GoalscopeConfig;
use goalscope_context::ContextEngine;
use goalscope_core::GoalscopeError;
use goalscope_llm::{AnswerGenerator, ChatClient, HttpEmbedder};
use goalscope_search::{FlatIndex, RecordStore, SearchEngine};
use tracing::info;

use crate::pipeline::QueryPipeline;

/// Load the corpus and build the search engine.
///
/// With an embedding endpoint configured the corpus must carry embeddings;
/// otherwise the engine runs lexical-only. Corpus problems surface as
/// [`GoalscopeError::NotReady`].
pub async fn build_search_engine(config: &GoalscopeConfig) -> Result<SearchEngine, GoalscopeError> {
    let store = Arc::new(RecordStore::load(Path::new(&config.corpus.path)).await?);
    let engine = SearchEngine::from_config(Arc::clone(&store), &config.search);

    let Some(embedder) = HttpEmbedder::from_config(&config.embedding)? else {
        info!("no embedding endpoint configured, running lexical-only");
        return Ok(engine);
    };

    let index = FlatIndex::from_store(&store, config.search.score_scale)?;
    info!(
        model = embedder.model(),
        dimension = index.dimension(),
        indexed = index.len(),
        "vector index ready"
    );
    Ok(engine.with_semantic(Arc::new(embedder), Arc::new(index)))
}

/// Build the full question-answering pipeline.
pub async fn build_pipeline(config: &GoalscopeConfig) -> Result<QueryPipeline, GoalscopeError> {
    let engine = build_search_engine(config).await?;
    let provider = Arc::new(ChatClient::from_config(&config.generator)?);
    let generator = AnswerGenerator::from_config(provider, &config.generator);
    let context = ContextEngine::from_config(&config.generator);
    Ok(QueryPipeline::new(engine, context, generator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_for(path: &Path) -> GoalscopeConfig {
        let mut config = GoalscopeConfig::default();
        config.corpus.path = path.display().to_string();
        config
    }

    fn corpus_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&goalscope_test_utils::sample_corpus()).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn lexical_only_without_embedding_endpoint() {
        let file = corpus_file();
        let engine = build_search_engine(&config_for(file.path())).await.unwrap();
        assert!(!engine.is_semantic());
        assert_eq!(engine.store().len(), 5);
    }

    #[tokio::test]
    async fn semantic_when_endpoint_configured() {
        let file = corpus_file();
        let mut config = config_for(file.path());
        config.embedding.endpoint = Some("http://127.0.0.1:9/v1/embeddings".into());
        let engine = build_search_engine(&config).await.unwrap();
        assert!(engine.is_semantic());
        assert_eq!(engine.stats().embedding_dimension, Some(4));
    }

    #[tokio::test]
    async fn missing_corpus_is_not_ready() {
        let config = config_for(Path::new("/nonexistent/goals.json"));
        let err = build_pipeline(&config).await.err().unwrap();
        assert!(err.is_not_ready());
    }
}
