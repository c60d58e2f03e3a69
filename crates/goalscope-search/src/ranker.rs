// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid ranking: blend semantic and lexical evidence, admit candidates
//! through two tiers, and order the survivors.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use goalscope_config::model::SearchConfig;
use goalscope_core::{GoalRecord, ScoredRecord, Tier};
use serde::Serialize;

use crate::keyword::KeywordScorer;

/// Blend weights and admission thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingParams {
    /// Weight of the semantic score; the keyword score gets `1 - alpha`.
    pub alpha: f32,
    /// Minimum hybrid score for the primary tier.
    pub primary_threshold: f32,
    /// Minimum hybrid score for the secondary tier.
    pub secondary_threshold: f32,
    /// Minimum keyword score for the secondary tier.
    pub secondary_keyword_floor: f32,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            primary_threshold: 0.1,
            secondary_threshold: 0.05,
            secondary_keyword_floor: 0.1,
        }
    }
}

impl From<&SearchConfig> for RankingParams {
    fn from(config: &SearchConfig) -> Self {
        Self {
            alpha: config.alpha,
            primary_threshold: config.primary_threshold,
            secondary_threshold: config.secondary_threshold,
            secondary_keyword_floor: config.secondary_keyword_floor,
        }
    }
}

/// `alpha * semantic + (1 - alpha) * keyword`.
pub fn hybrid_score(semantic: f32, keyword: f32, alpha: f32) -> f32 {
    alpha * semantic + (1.0 - alpha) * keyword
}

/// User-facing summary of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum RankFeedback {
    NoResults,
    Found(usize),
}

impl RankFeedback {
    fn for_count(count: usize) -> Self {
        if count == 0 {
            Self::NoResults
        } else {
            Self::Found(count)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoResults)
    }
}

impl fmt::Display for RankFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResults => f.write_str("No results found"),
            Self::Found(n) => write!(f, "Found {n} results"),
        }
    }
}

/// Ranked records, best first, with their feedback line.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub results: Vec<ScoredRecord>,
    pub feedback: RankFeedback,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Keep only the `k` best results. Feedback follows the new count.
    pub fn truncate(&mut self, k: usize) {
        self.results.truncate(k);
        self.feedback = RankFeedback::for_count(self.results.len());
    }
}

/// Ranks candidate records for a query.
#[derive(Debug, Clone, Default)]
pub struct HybridRanker {
    params: RankingParams,
}

impl HybridRanker {
    pub fn new(params: RankingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RankingParams {
        &self.params
    }

    /// Score, admit, and order candidates.
    ///
    /// Each candidate carries a semantic score already normalized to `[0, 1]`;
    /// non-finite values count as 0. A candidate is admitted to the primary
    /// tier when its hybrid score clears `primary_threshold`, otherwise to
    /// the secondary tier when it clears `secondary_threshold` and its
    /// keyword score clears `secondary_keyword_floor`. Everything else is
    /// dropped. Admitted records are ordered by descending hybrid score;
    /// equal scores keep primary before secondary and then arrival order.
    pub fn rank(
        &self,
        query: &str,
        candidates: impl IntoIterator<Item = (f32, Arc<GoalRecord>)>,
        known_departments: &HashSet<String>,
    ) -> Ranking {
        let scorer = KeywordScorer::new(query, known_departments);
        let p = &self.params;

        let mut primary = Vec::new();
        let mut secondary = Vec::new();

        for (semantic, record) in candidates {
            let semantic_score = if semantic.is_finite() { semantic } else { 0.0 };
            let keyword_score = scorer.score(&record);
            let hybrid = hybrid_score(semantic_score, keyword_score, p.alpha);

            let tier = if hybrid >= p.primary_threshold {
                Tier::Primary
            } else if hybrid >= p.secondary_threshold && keyword_score >= p.secondary_keyword_floor {
                Tier::Secondary
            } else {
                continue;
            };

            let scored = ScoredRecord {
                record,
                semantic_score,
                keyword_score,
                hybrid_score: hybrid,
                tier,
            };
            match tier {
                Tier::Primary => primary.push(scored),
                Tier::Secondary => secondary.push(scored),
            }
        }

        tracing::debug!(
            primary = primary.len(),
            secondary = secondary.len(),
            "candidates admitted"
        );

        let mut results = primary;
        results.append(&mut secondary);
        // Stable sort: ties keep tier order, then arrival order.
        results.sort_by(|a, b| b.hybrid_score.total_cmp(&a.hybrid_score));

        let feedback = RankFeedback::for_count(results.len());
        Ranking { results, feedback }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(title: &str, owner: &str, health: &str) -> Arc<GoalRecord> {
        Arc::new(GoalRecord {
            title: Some(title.into()),
            owner: Some(owner.into()),
            department: Some("Engineering".into()),
            health: Some(health.into()),
            ..Default::default()
        })
    }

    fn depts() -> HashSet<String> {
        HashSet::from(["Engineering".to_string()])
    }

    #[test]
    fn hybrid_is_exact_blend() {
        let ranker = HybridRanker::default();
        let ranking = ranker.rank(
            "onboarding",
            vec![(0.9, record("Onboarding revamp", "Ana Silva", "On Track"))],
            &depts(),
        );
        let r = &ranking.results[0];
        assert_eq!(
            r.hybrid_score,
            0.2 * r.semantic_score + (1.0 - 0.2) * r.keyword_score
        );
        assert_eq!(r.tier, Tier::Primary);
    }

    #[test]
    fn empty_candidates_yield_no_results() {
        let ranking = HybridRanker::default().rank("anything", Vec::new(), &depts());
        assert!(ranking.is_empty());
        assert!(ranking.feedback.is_empty());
        assert_eq!(ranking.feedback.to_string(), "No results found");
    }

    #[test]
    fn feedback_reports_count() {
        let ranking = HybridRanker::default().rank(
            "billing",
            vec![
                (0.5, record("Billing migration", "Ana Silva", "On Track")),
                (0.4, record("Billing audit", "Tom Reyes", "On Track")),
            ],
            &depts(),
        );
        assert_eq!(ranking.feedback, RankFeedback::Found(2));
        assert_eq!(ranking.feedback.to_string(), "Found 2 results");
    }

    #[test]
    fn keyword_evidence_rescues_into_secondary_tier() {
        let ranker = HybridRanker::new(RankingParams {
            alpha: 0.2,
            primary_threshold: 0.5,
            secondary_threshold: 0.05,
            secondary_keyword_floor: 0.1,
        });
        let mut rec = GoalRecord {
            title: Some("Migrate billing".into()),
            health: Some("On Track".into()),
            ..Default::default()
        };
        rec.milestones.push(goalscope_core::Milestone {
            title: Some("Cutover".into()),
            health: Some("Behind".into()),
            ..Default::default()
        });

        let ranking = ranker.rank(
            "show me delayed milestones",
            vec![(0.01, Arc::new(rec))],
            &depts(),
        );
        assert_eq!(ranking.results.len(), 1);
        assert_eq!(ranking.results[0].tier, Tier::Secondary);
        assert!(ranking.results[0].keyword_score >= 0.1);
    }

    #[test]
    fn rescued_records_follow_every_primary_record() {
        let ranker = HybridRanker::new(RankingParams {
            alpha: 0.2,
            primary_threshold: 0.3,
            secondary_threshold: 0.05,
            secondary_keyword_floor: 0.1,
        });
        let ranking = ranker.rank(
            "billing audit plan",
            vec![
                (0.0, record("Plan review", "Lee Park", "On Track")),
                (0.9, record("Billing migration", "Ana Silva", "On Track")),
                (0.2, record("Office move", "Tom Reyes", "On Track")),
                (0.5, record("Billing audit", "Priya Nair", "On Track")),
            ],
            &depts(),
        );

        let titles: Vec<&str> = ranking.results.iter().map(|r| r.record.title()).collect();
        assert_eq!(titles, vec!["Billing audit", "Billing migration", "Plan review"]);
        let tiers: Vec<Tier> = ranking.results.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![Tier::Primary, Tier::Primary, Tier::Secondary]);

        let last_primary = tiers.iter().rposition(|t| *t == Tier::Primary);
        let first_secondary = tiers.iter().position(|t| *t == Tier::Secondary);
        assert!(last_primary < first_secondary);
    }

    #[test]
    fn weak_candidates_without_keyword_evidence_are_dropped() {
        let ranking = HybridRanker::default().rank(
            "quantum compliance",
            vec![(0.05, record("Onboarding revamp", "Ana Silva", "On Track"))],
            &depts(),
        );
        assert!(ranking.is_empty());
    }

    #[test]
    fn ordered_by_descending_hybrid() {
        let ranking = HybridRanker::default().rank(
            "billing",
            vec![
                (0.1, record("Hiring plan", "Tom Reyes", "On Track")),
                (0.9, record("Billing migration", "Ana Silva", "On Track")),
                (0.6, record("Office move", "Lee Park", "On Track")),
            ],
            &depts(),
        );
        let scores: Vec<f32> = ranking.results.iter().map(|r| r.hybrid_score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
        assert_eq!(ranking.results[0].record.title(), "Billing migration");
    }

    #[test]
    fn ties_keep_arrival_order() {
        let a = record("Alpha", "Ana Silva", "On Track");
        let b = record("Bravo", "Tom Reyes", "On Track");
        let ranking = HybridRanker::default().rank(
            "unrelated words",
            vec![(0.8, a), (0.8, b)],
            &depts(),
        );
        let titles: Vec<&str> = ranking.results.iter().map(|r| r.record.title()).collect();
        assert_eq!(titles, vec!["Alpha", "Bravo"]);
    }

    #[test]
    fn non_finite_semantic_counts_as_zero() {
        let ranking = HybridRanker::default().rank(
            "billing",
            vec![(f32::NAN, record("Billing migration", "Ana Silva", "On Track"))],
            &depts(),
        );
        assert_eq!(ranking.results[0].semantic_score, 0.0);
    }

    #[test]
    fn truncate_updates_feedback() {
        let mut ranking = HybridRanker::default().rank(
            "billing",
            vec![
                (0.5, record("Billing migration", "Ana Silva", "On Track")),
                (0.4, record("Billing audit", "Tom Reyes", "On Track")),
            ],
            &depts(),
        );
        ranking.truncate(1);
        assert_eq!(ranking.feedback, RankFeedback::Found(1));
    }

    #[test]
    fn sarah_query_ranks_her_goal_first() {
        let sarah = record("Platform reliability", "Sarah Chen", "On Track");
        let tom = record("Platform reliability", "Tom Reyes", "On Track");
        let ranking = HybridRanker::default().rank(
            "What is Sarah working on?",
            vec![(0.5, tom), (0.5, sarah)],
            &depts(),
        );
        assert_eq!(ranking.results[0].record.owner(), "Sarah Chen");
    }

    const TITLES: &[&str] = &[
        "billing audit",
        "billing",
        "audit plan",
        "office move",
        "hiring plan",
        "billing audit plan",
    ];

    fn siblings(specs: &[(f32, usize)]) -> Vec<(f32, Arc<GoalRecord>)> {
        specs
            .iter()
            .map(|(s, t)| (*s, record(TITLES[*t % TITLES.len()], "Ana Silva", "On Track")))
            .collect()
    }

    fn position(ranking: &Ranking, target: &Arc<GoalRecord>) -> Option<usize> {
        ranking
            .results
            .iter()
            .position(|r| Arc::ptr_eq(&r.record, target))
    }

    proptest! {
        #[test]
        fn reranking_ranked_output_keeps_order(
            specs in prop::collection::vec((0.0f32..=1.0, 0usize..6), 0..20),
            alpha in 0.0f32..=1.0,
        ) {
            let ranker = HybridRanker::new(RankingParams { alpha, ..RankingParams::default() });
            let first = ranker.rank("billing audit plan", siblings(&specs), &depts());
            let again = ranker.rank(
                "billing audit plan",
                first.results.iter().map(|r| (r.semantic_score, Arc::clone(&r.record))),
                &depts(),
            );

            prop_assert_eq!(first.results.len(), again.results.len());
            for (a, b) in first.results.iter().zip(&again.results) {
                prop_assert!(Arc::ptr_eq(&a.record, &b.record));
                prop_assert_eq!(a.hybrid_score, b.hybrid_score);
                prop_assert_eq!(a.tier, b.tier);
            }
        }

        #[test]
        fn raising_keyword_score_never_drops_rank(
            specs in prop::collection::vec((0.0f32..=1.0, 0usize..6), 0..12),
            semantic in 0.0f32..=1.0,
            slot in 0usize..13,
            alpha in 0.0f32..=1.0,
        ) {
            let ranker = HybridRanker::new(RankingParams { alpha, ..RankingParams::default() });
            let query = "billing audit plan";
            let weak = record("billing", "Ana Silva", "On Track");
            let strong = record("billing audit", "Ana Silva", "On Track");

            // Same siblings, same semantic score, same input slot; only the
            // target's keyword evidence differs.
            let with = |target: &Arc<GoalRecord>| {
                let mut candidates = siblings(&specs);
                let at = slot.min(candidates.len());
                candidates.insert(at, (semantic, Arc::clone(target)));
                ranker.rank(query, candidates, &depts())
            };
            let weak_ranking = with(&weak);
            let strong_ranking = with(&strong);

            if let Some(weak_at) = position(&weak_ranking, &weak) {
                let strong_at = position(&strong_ranking, &strong);
                prop_assert!(strong_at.is_some(), "stronger evidence dropped the candidate");
                prop_assert!(strong_at.unwrap_or(usize::MAX) <= weak_at);
            }
        }

        #[test]
        fn admitted_records_satisfy_a_tier(
            semantics in prop::collection::vec(0.0f32..=1.0, 0..20),
            alpha in 0.0f32..=1.0,
        ) {
            let params = RankingParams { alpha, ..RankingParams::default() };
            let candidates: Vec<_> = semantics
                .iter()
                .enumerate()
                .map(|(i, s)| (*s, record(&format!("goal {i} billing"), "Ana Silva", "On Track")))
                .collect();
            let ranking = HybridRanker::new(params).rank("billing audit", candidates, &depts());
            for r in &ranking.results {
                let primary = r.hybrid_score >= params.primary_threshold;
                let secondary = r.hybrid_score >= params.secondary_threshold
                    && r.keyword_score >= params.secondary_keyword_floor;
                prop_assert!(primary || secondary);
                prop_assert!((0.0..=1.0).contains(&r.semantic_score));
                prop_assert!((0.0..=1.0).contains(&r.keyword_score));
            }
            prop_assert!(ranking.results.windows(2).all(|w| w[0].hybrid_score >= w[1].hybrid_score));
        }

        #[test]
        fn more_keyword_evidence_never_lowers_rank(sem_a in 0.0f32..=1.0, sem_b in 0.0f32..=1.0) {
            // Same semantic score; the record matching more query words must not rank lower.
            let strong = record("billing audit", "Ana Silva", "On Track");
            let weak = record("billing", "Ana Silva", "On Track");
            let s = sem_a.max(sem_b);
            let ranking = HybridRanker::default().rank(
                "billing audit",
                vec![(s, weak), (s, strong)],
                &depts(),
            );
            prop_assert_eq!(ranking.results[0].record.title(), "billing audit");
        }
    }
}
