// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static lookup tables for query interpretation.
//!
//! Built once on first use and never mutated, so concurrent queries can
//! share them without locking.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use goalscope_core::HealthCategory;

/// Colloquial terms per canonical health category. Each term maps to exactly one category.
const HEALTH_VOCABULARY: &[(HealthCategory, &[&str])] = &[
    (
        HealthCategory::Behind,
        &["behind", "delayed", "late", "overdue", "slipping", "slipped"],
    ),
    (
        HealthCategory::AtRisk,
        &["risk", "risky", "at-risk", "atrisk", "concern", "concerning", "yellow"],
    ),
    (
        HealthCategory::OnTrack,
        &["track", "on-track", "ontrack", "good", "green", "progress", "progressing"],
    ),
    (
        HealthCategory::Exceeded,
        &["exceeded", "exceeding", "ahead", "early", "beating"],
    ),
    (
        HealthCategory::Achieved,
        &["achieved", "completed", "done", "finished", "complete"],
    ),
    (
        HealthCategory::NotStarted,
        &["not-started", "notstarted", "waiting", "pending", "queue", "queued"],
    ),
    (
        HealthCategory::NotTracked,
        &["not-tracked", "nottracked", "untracked", "unknown"],
    ),
];

/// Words that signal the user is asking who owns or works on something.
const OWNERSHIP_VOCABULARY: &[&str] = &[
    "own", "owns", "owner", "owners", "owned", "owning", "responsible", "assigned", "managing",
    "manages", "lead", "leads", "leading", "belong", "belongs", "working", "handling", "handles",
    "driving", "drives", "whose",
];

/// Function words and generic goal vocabulary that never name a person.
const STOPWORD_VOCABULARY: &[&str] = &[
    "a", "about", "all", "an", "and", "any", "are", "as", "at", "be", "by", "can", "currently",
    "did", "do", "does", "for", "from", "give", "goal", "goals", "has", "have", "how", "i", "in",
    "is", "it", "its", "kpi", "kpis", "list", "me", "milestone", "milestones", "my", "now", "of",
    "on", "or", "our", "show", "status", "tell", "that", "the", "their", "them", "there",
    "these", "they", "this", "those", "to", "under", "us", "was", "we", "were", "what", "which",
    "who", "whom", "with", "you", "your",
];

static HEALTH_TERMS: LazyLock<HashMap<&'static str, HealthCategory>> = LazyLock::new(|| {
    HEALTH_VOCABULARY
        .iter()
        .flat_map(|(category, terms)| terms.iter().map(move |term| (*term, *category)))
        .collect()
});

static OWNERSHIP_TERMS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| OWNERSHIP_VOCABULARY.iter().copied().collect());

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORD_VOCABULARY.iter().copied().collect());

/// Canonical health category a query term refers to, if any.
pub fn health_category_for(term: &str) -> Option<HealthCategory> {
    HEALTH_TERMS.get(term).copied()
}

/// Whether a query term expresses ownership intent.
pub fn is_ownership_term(term: &str) -> bool {
    OWNERSHIP_TERMS.contains(term)
}

/// Whether a query term is a function word that carries no name.
pub fn is_stopword(term: &str) -> bool {
    STOPWORDS.contains(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_term_maps_to_exactly_one_category() {
        let total: usize = HEALTH_VOCABULARY.iter().map(|(_, terms)| terms.len()).sum();
        assert_eq!(HEALTH_TERMS.len(), total, "a term is listed under two categories");
    }

    #[test]
    fn every_category_has_terms() {
        for category in HealthCategory::iter() {
            assert!(
                HEALTH_TERMS.values().any(|c| *c == category),
                "{category} has no vocabulary"
            );
        }
    }

    #[test]
    fn colloquial_terms_map_to_canonical_status() {
        assert_eq!(health_category_for("delayed"), Some(HealthCategory::Behind));
        assert_eq!(health_category_for("overdue"), Some(HealthCategory::Behind));
        assert_eq!(health_category_for("yellow"), Some(HealthCategory::AtRisk));
        assert_eq!(health_category_for("at-risk"), Some(HealthCategory::AtRisk));
        assert_eq!(health_category_for("green"), Some(HealthCategory::OnTrack));
        assert_eq!(health_category_for("beating"), Some(HealthCategory::Exceeded));
        assert_eq!(health_category_for("done"), Some(HealthCategory::Achieved));
        assert_eq!(health_category_for("pending"), Some(HealthCategory::NotStarted));
        assert_eq!(health_category_for("untracked"), Some(HealthCategory::NotTracked));
        assert_eq!(health_category_for("revenue"), None);
    }

    #[test]
    fn ownership_terms_are_recognized() {
        for term in ["owns", "responsible", "leads", "belongs", "working"] {
            assert!(is_ownership_term(term), "{term} should signal ownership");
        }
        assert!(!is_ownership_term("revenue"));
    }

    #[test]
    fn function_words_are_stopwords() {
        for term in ["the", "and", "all", "for", "who", "what", "goals"] {
            assert!(is_stopword(term), "{term} should be a stopword");
        }
        assert!(!is_stopword("sarah"));
        assert!(!is_stopword("billing"));
    }

    #[test]
    fn stopwords_do_not_overlap_other_vocabulary() {
        for term in STOPWORD_VOCABULARY {
            assert!(!is_ownership_term(term), "{term} is also an ownership term");
            assert!(health_category_for(term).is_none(), "{term} is also a health term");
        }
    }
}
