// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexical relevance scoring.
//!
//! A query is parsed once into [`QueryTerms`]; each candidate record is then
//! scored against it with no side effects, so scoring can be spread across
//! threads freely.

use std::collections::HashSet;

use goalscope_core::{GoalRecord, HealthCategory};

use crate::vocabulary::{health_category_for, is_ownership_term, is_stopword};

/// Added when a query token matches part of the goal owner's name.
const GOAL_OWNER_BOOST: f32 = 0.3;
/// Added when a query token matches part of a milestone owner's name.
const MILESTONE_OWNER_BOOST: f32 = 0.15;
/// Added when the query names the goal's own health category.
const GOAL_HEALTH_BOOST: f32 = 0.3;
/// Added when the query names the health category of one of the goal's milestones.
const MILESTONE_HEALTH_BOOST: f32 = 0.2;
/// Added when the query names the goal's department.
const DEPARTMENT_BOOST: f32 = 0.25;
/// Shortest query token allowed to prefix-match an owner name part.
const MIN_PREFIX_LEN: usize = 3;

/// Split free text into lower-cased tokens.
///
/// Tokens are whitespace separated; punctuation at either end is dropped,
/// internal hyphens and apostrophes are kept, and a trailing possessive
/// `'s` is removed.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(|raw| {
        let lowered = raw.to_lowercase();
        let trimmed = lowered.trim_matches(|c: char| !c.is_alphanumeric());
        let stem = trimmed
            .strip_suffix("'s")
            .or_else(|| trimmed.strip_suffix("\u{2019}s"))
            .unwrap_or(trimmed);
        (!stem.is_empty()).then(|| stem.to_string())
    })
}

/// The parts of a query the scorer cares about.
#[derive(Debug, Clone, Default)]
pub struct QueryTerms {
    /// Distinct query tokens.
    pub tokens: HashSet<String>,
    /// Health categories the query refers to, via single words or joined word pairs.
    pub health: HashSet<HealthCategory>,
    /// Whether the query asks who owns or works on something.
    pub ownership_intent: bool,
    /// Lower-cased names of known departments the query mentions.
    pub departments: HashSet<String>,
}

impl QueryTerms {
    /// Interpret `query` against the set of department names present in the corpus.
    ///
    /// Health terms are read without regard to negation: "not on track"
    /// refers to on-track goals just as "on track" does.
    pub fn parse(query: &str, known_departments: &HashSet<String>) -> Self {
        let ordered: Vec<String> = tokenize(query).collect();
        let tokens: HashSet<String> = ordered.iter().cloned().collect();

        // "at risk" and "not started" only carry meaning as a pair.
        let pairs = ordered.windows(2).map(|w| format!("{}-{}", w[0], w[1]));
        let health = ordered
            .iter()
            .cloned()
            .chain(pairs)
            .filter_map(|term| health_category_for(&term))
            .collect();

        let ownership_intent = tokens.iter().any(|t| is_ownership_term(t));

        let departments = known_departments
            .iter()
            .map(|d| d.to_lowercase())
            .filter(|dept| {
                let mut words = tokenize(dept).peekable();
                words.peek().is_some() && words.all(|w| tokens.contains(&w))
            })
            .collect();

        Self {
            tokens,
            health,
            ownership_intent,
            departments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether any name-bearing query token matches a part of `name`.
    ///
    /// Vocabulary words ("owns", "delayed") and function words ("the",
    /// "who") never count as names.
    fn names(&self, name: &str) -> bool {
        let parts: Vec<String> = tokenize(name).collect();
        if parts.is_empty() {
            return false;
        }
        self.tokens
            .iter()
            .filter(|t| {
                !is_ownership_term(t) && !is_stopword(t) && health_category_for(t).is_none()
            })
            .any(|token| {
                parts.iter().any(|part| {
                    part == token
                        || (token.chars().count() >= MIN_PREFIX_LEN && part.starts_with(token.as_str()))
                })
            })
    }
}

/// Scores records against one parsed query.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    terms: QueryTerms,
}

impl KeywordScorer {
    pub fn new(query: &str, known_departments: &HashSet<String>) -> Self {
        Self {
            terms: QueryTerms::parse(query, known_departments),
        }
    }

    pub fn terms(&self) -> &QueryTerms {
        &self.terms
    }

    /// Lexical relevance of `record` in `[0, 1]`.
    ///
    /// The base is the fraction of query tokens present in the goal's text.
    /// Owner, health, and department evidence add fixed boosts on top; owner
    /// boosts apply only when the query expresses ownership intent.
    pub fn score(&self, record: &GoalRecord) -> f32 {
        if self.terms.is_empty() {
            return 0.0;
        }

        let document = document_tokens(record);
        let matched = self
            .terms
            .tokens
            .iter()
            .filter(|t| document.contains(*t))
            .count();
        let mut score = matched as f32 / self.terms.tokens.len() as f32;

        if self.terms.ownership_intent {
            if self.terms.names(record.owner()) {
                score += GOAL_OWNER_BOOST;
            } else if record.milestones.iter().any(|m| self.terms.names(m.owner())) {
                score += MILESTONE_OWNER_BOOST;
            }
        }

        if !self.terms.health.is_empty() {
            let goal_match = record
                .health_category()
                .is_some_and(|c| self.terms.health.contains(&c));
            if goal_match {
                score += GOAL_HEALTH_BOOST;
            } else if record
                .milestones
                .iter()
                .filter_map(|m| m.health_category())
                .any(|c| self.terms.health.contains(&c))
            {
                score += MILESTONE_HEALTH_BOOST;
            }
        }

        if !self.terms.departments.is_empty()
            && self
                .terms
                .departments
                .contains(&record.department().to_lowercase())
        {
            score += DEPARTMENT_BOOST;
        }

        score.clamp(0.0, 1.0)
    }
}

/// Lexical relevance of `record` to `query`. Empty queries score 0.
///
/// Parses the query on every call; use [`KeywordScorer`] when scoring many records.
pub fn score(query: &str, record: &GoalRecord, known_departments: &HashSet<String>) -> f32 {
    KeywordScorer::new(query, known_departments).score(record)
}

/// Every token in the goal's searchable text: its own fields plus its
/// milestones' and KPIs' titles, descriptions, and owners.
fn document_tokens(record: &GoalRecord) -> HashSet<String> {
    let goal_fields = [
        record.title(),
        record.description(),
        record.owner(),
        record.department(),
        record.health(),
    ];
    let milestone_fields = record
        .milestones
        .iter()
        .flat_map(|m| [m.title(), m.description(), m.owner()]);
    let kpi_fields = record.kpis.iter().flat_map(|k| [k.title(), k.description()]);

    goal_fields
        .into_iter()
        .chain(milestone_fields)
        .chain(kpi_fields)
        .flat_map(tokenize)
        .collect()
}
