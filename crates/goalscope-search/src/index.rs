// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exact in-memory nearest-neighbor index over the embeddings shipped with
//! the corpus, and normalization of raw retriever scores.

use async_trait::async_trait;
use goalscope_core::{GoalscopeError, Neighbor, PluginAdapter, ScoreScale, VectorRetriever};
use tracing::warn;

use crate::store::RecordStore;

/// Map a raw retriever score to a `[0, 1]` similarity where higher is better.
///
/// Distances become `1 / (1 + d)`; similarities are clamped. Anything
/// non-finite or negative-distance maps to 0.
pub fn normalize_score(raw: f32, scale: ScoreScale) -> f32 {
    if !raw.is_finite() {
        return 0.0;
    }
    match scale {
        ScoreScale::L2Distance if raw < 0.0 => 0.0,
        ScoreScale::L2Distance => 1.0 / (1.0 + raw),
        ScoreScale::Similarity => raw.clamp(0.0, 1.0),
    }
}

/// Brute-force index. Fine for the few thousand goals an organization tracks.
///
/// Scores are Euclidean distances under [`ScoreScale::L2Distance`] and cosine
/// similarities under [`ScoreScale::Similarity`].
#[derive(Debug, Clone)]
pub struct FlatIndex {
    /// `(store position, embedding)`; records without an embedding are absent.
    entries: Vec<(usize, Vec<f32>)>,
    dimension: usize,
    scale: ScoreScale,
}

impl FlatIndex {
    /// Index every record in `store` that carries an embedding.
    ///
    /// The first embedding fixes the dimension; records that disagree are
    /// left out. Fails with [`GoalscopeError::NotReady`] when no record has
    /// an embedding.
    pub fn from_store(store: &RecordStore, scale: ScoreScale) -> Result<Self, GoalscopeError> {
        let mut dimension = 0;
        let mut entries = Vec::new();
        for (i, record) in store.records().iter().enumerate() {
            if record.embedding.is_empty() {
                continue;
            }
            if dimension == 0 {
                dimension = record.embedding.len();
            }
            if record.embedding.len() != dimension {
                warn!(
                    goal = %record.id,
                    expected = dimension,
                    actual = record.embedding.len(),
                    "embedding dimension mismatch, record left out of the index"
                );
                continue;
            }
            entries.push((i, record.embedding.clone()));
        }
        if entries.is_empty() {
            return Err(GoalscopeError::not_ready(
                "corpus carries no embeddings; re-run ingestion with an embedding model",
            ));
        }
        Ok(Self {
            entries,
            dimension,
            scale,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl PluginAdapter for FlatIndex {
    fn name(&self) -> &str {
        match self.scale {
            ScoreScale::L2Distance => "flat-l2",
            ScoreScale::Similarity => "flat-cosine",
        }
    }
}

#[async_trait]
impl VectorRetriever for FlatIndex {
    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, GoalscopeError> {
        if query.len() != self.dimension {
            return Err(GoalscopeError::not_ready(format!(
                "query embedding has {} dimensions but the index has {}; the embedding model does not match the corpus",
                query.len(),
                self.dimension
            )));
        }
        let metric: fn(&[f32], &[f32]) -> f32 = match self.scale {
            ScoreScale::L2Distance => l2_distance,
            ScoreScale::Similarity => cosine_similarity,
        };
        let mut neighbors: Vec<Neighbor> = self
            .entries
            .iter()
            .map(|(index, embedding)| Neighbor {
                index: *index,
                score: metric(query, embedding),
            })
            .collect();
        // Best first: smallest distance, or largest similarity.
        match self.scale {
            ScoreScale::L2Distance => neighbors.sort_by(|a, b| a.score.total_cmp(&b.score)),
            ScoreScale::Similarity => neighbors.sort_by(|a, b| b.score.total_cmp(&a.score)),
        }
        neighbors.truncate(k);
        Ok(neighbors)
    }

    fn scale(&self) -> ScoreScale {
        self.scale
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalscope_core::GoalRecord;
    use proptest::prelude::*;

    fn embedded(title: &str, embedding: Vec<f32>) -> GoalRecord {
        GoalRecord {
            title: Some(title.into()),
            embedding,
            ..Default::default()
        }
    }

    #[test]
    fn normalize_distance() {
        assert_eq!(normalize_score(0.0, ScoreScale::L2Distance), 1.0);
        assert_eq!(normalize_score(1.0, ScoreScale::L2Distance), 0.5);
        assert_eq!(normalize_score(-3.0, ScoreScale::L2Distance), 0.0);
        assert_eq!(normalize_score(f32::INFINITY, ScoreScale::L2Distance), 0.0);
    }

    #[test]
    fn normalize_similarity() {
        assert_eq!(normalize_score(0.7, ScoreScale::Similarity), 0.7);
        assert_eq!(normalize_score(1.4, ScoreScale::Similarity), 1.0);
        assert_eq!(normalize_score(-0.2, ScoreScale::Similarity), 0.0);
        assert_eq!(normalize_score(f32::NAN, ScoreScale::Similarity), 0.0);
    }

    #[tokio::test]
    async fn search_returns_nearest_first() {
        let store = RecordStore::from_records(vec![
            embedded("far", vec![10.0, 10.0]),
            embedded("near", vec![1.0, 0.0]),
            embedded("none", Vec::new()),
            embedded("mid", vec![3.0, 0.0]),
        ]);
        let index = FlatIndex::from_store(&store, ScoreScale::L2Distance).unwrap();
        assert_eq!(index.len(), 3);

        let neighbors = index.search(&[0.0, 0.0], 2).await.unwrap();
        let positions: Vec<usize> = neighbors.iter().map(|n| n.index).collect();
        assert_eq!(positions, vec![1, 3]);
        assert_eq!(neighbors[0].score, 1.0);
    }

    #[tokio::test]
    async fn cosine_search_returns_most_similar_first() {
        let store = RecordStore::from_records(vec![
            embedded("orthogonal", vec![0.0, 1.0]),
            embedded("aligned", vec![2.0, 0.0]),
            embedded("diagonal", vec![1.0, 1.0]),
        ]);
        let index = FlatIndex::from_store(&store, ScoreScale::Similarity).unwrap();
        let neighbors = index.search(&[1.0, 0.0], 3).await.unwrap();
        let positions: Vec<usize> = neighbors.iter().map(|n| n.index).collect();
        assert_eq!(positions, vec![1, 2, 0]);
        assert!((neighbors[0].score - 1.0).abs() < 1e-6);
        assert_eq!(index.scale(), ScoreScale::Similarity);
    }

    #[test]
    fn mismatched_dimensions_are_left_out() {
        let store = RecordStore::from_records(vec![
            embedded("a", vec![1.0, 0.0]),
            embedded("b", vec![1.0, 0.0, 0.0]),
        ]);
        let index = FlatIndex::from_store(&store, ScoreScale::L2Distance).unwrap();
        assert_eq!(index.dimension(), 2);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn corpus_without_embeddings_is_not_ready() {
        let store = RecordStore::from_records(vec![embedded("a", Vec::new())]);
        assert!(FlatIndex::from_store(&store, ScoreScale::L2Distance).unwrap_err().is_not_ready());
    }

    #[tokio::test]
    async fn wrong_query_dimension_is_not_ready() {
        let store = RecordStore::from_records(vec![embedded("a", vec![1.0, 0.0])]);
        let index = FlatIndex::from_store(&store, ScoreScale::L2Distance).unwrap();
        let err = index.search(&[1.0, 0.0, 0.0], 5).await.unwrap_err();
        assert!(err.is_not_ready());
    }

    proptest! {
        #[test]
        fn normalized_scores_stay_in_unit_range(raw in prop::num::f32::ANY) {
            for scale in [ScoreScale::L2Distance, ScoreScale::Similarity] {
                let s = normalize_score(raw, scale);
                prop_assert!((0.0..=1.0).contains(&s));
            }
        }
    }
}
