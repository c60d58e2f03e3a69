// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only store of goal records loaded from the ingestion export.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

use goalscope_core::{GoalId, GoalRecord, GoalscopeError, Neighbor, ScoreScale};
use serde::Serialize;
use tracing::{debug, info};

use crate::index::normalize_score;

/// Immutable corpus shared by every query.
///
/// Records are addressed by position; the vector index refers to them the
/// same way. Nothing here changes after construction.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Arc<GoalRecord>>,
    departments: HashSet<String>,
}

impl RecordStore {
    /// Build a store from records already in memory.
    ///
    /// Records without an id get their position as one.
    pub fn from_records(records: Vec<GoalRecord>) -> Self {
        let records: Vec<Arc<GoalRecord>> = records
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                if r.id.is_empty() {
                    r.id = GoalId(i.to_string());
                }
                Arc::new(r)
            })
            .collect();

        let departments = records
            .iter()
            .map(|r| r.department())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            records,
            departments,
        }
    }

    /// Load the JSON array written by ingestion.
    ///
    /// A missing, unreadable, malformed, or empty corpus is
    /// [`GoalscopeError::NotReady`]: the data must be re-provisioned.
    pub async fn load(path: &Path) -> Result<Self, GoalscopeError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GoalscopeError::NotReady {
                message: format!("cannot read corpus {}", path.display()),
                source: Some(Box::new(e)),
            })?;
        let store = Self::from_json(&raw).map_err(|e| match e {
            GoalscopeError::NotReady { message, source } => GoalscopeError::NotReady {
                message: format!("{message} in {}", path.display()),
                source,
            },
            other => other,
        })?;
        info!(
            path = %path.display(),
            goals = store.len(),
            departments = store.departments.len(),
            "corpus loaded"
        );
        Ok(store)
    }

    /// Parse a corpus from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, GoalscopeError> {
        let records: Vec<GoalRecord> =
            serde_json::from_str(raw).map_err(|e| GoalscopeError::NotReady {
                message: "corpus is not a valid goal export".into(),
                source: Some(Box::new(e)),
            })?;
        if records.is_empty() {
            return Err(GoalscopeError::not_ready("corpus contains no goals"));
        }
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<GoalRecord>> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Arc<GoalRecord>] {
        &self.records
    }

    /// Distinct non-empty department names, as written in the corpus.
    pub fn known_departments(&self) -> &HashSet<String> {
        &self.departments
    }

    /// Turn retriever neighbors into ranker candidates.
    ///
    /// Raw scores are normalized from `scale`; indices past the end of the
    /// store are skipped.
    pub fn resolve(&self, neighbors: &[Neighbor], scale: ScoreScale) -> Vec<(f32, Arc<GoalRecord>)> {
        neighbors
            .iter()
            .filter_map(|n| match self.records.get(n.index) {
                Some(record) => Some((normalize_score(n.score, scale), Arc::clone(record))),
                None => {
                    debug!(index = n.index, len = self.records.len(), "skipping out-of-range neighbor");
                    None
                }
            })
            .collect()
    }

    /// Every record with a semantic score of 0, for lexical-only search.
    pub fn all_candidates(&self) -> Vec<(f32, Arc<GoalRecord>)> {
        self.records.iter().map(|r| (0.0, Arc::clone(r))).collect()
    }

    pub fn stats(&self, dimension: Option<usize>, model_name: Option<&str>) -> IndexStats {
        IndexStats {
            total_goals: self.records.len(),
            total_milestones: self.records.iter().map(|r| r.milestones.len()).sum(),
            total_kpis: self.records.iter().map(|r| r.kpis.len()).sum(),
            departments: self.departments.iter().cloned().collect(),
            embedding_dimension: dimension,
            embedding_model: model_name.map(str::to_string),
        }
    }

    /// Field completeness across the corpus.
    pub fn quality_report(&self) -> QualityReport {
        let mut report = QualityReport {
            total_goals: self.records.len(),
            ..QualityReport::default()
        };
        for record in &self.records {
            if !record.owner().is_empty() {
                report.goals_with_owners += 1;
            }
            if !record.department().is_empty() {
                report.goals_with_departments += 1;
            }
            if !record.milestones.is_empty() {
                report.goals_with_milestones += 1;
            }
            report.total_milestones += record.milestones.len();
            if record.title().is_empty() {
                report.issues.push(format!("goal {} has no title", record.id));
            }
        }
        report
    }
}

/// Summary of what the store and index hold.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub total_goals: usize,
    pub total_milestones: usize,
    pub total_kpis: usize,
    /// Sorted for stable display.
    pub departments: BTreeSet<String>,
    pub embedding_dimension: Option<usize>,
    pub embedding_model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QualityReport {
    pub total_goals: usize,
    pub goals_with_owners: usize,
    pub goals_with_departments: usize,
    pub goals_with_milestones: usize,
    pub total_milestones: usize,
    pub issues: Vec<String>,
}
