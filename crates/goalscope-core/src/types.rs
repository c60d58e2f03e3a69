// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the search engine, context assembler, and adapters.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Values that ingestion exports use to mean "no value".
const SENTINELS: &[&str] = &["nan", "nat", "none", "null"];

/// Returns the trimmed text of an optional field, or `""` when the field is
/// absent or holds a missing-value sentinel such as `nan`.
pub fn field_text(value: &Option<String>) -> &str {
    match value.as_deref().map(str::trim) {
        Some(v) if !is_sentinel(v) => v,
        _ => "",
    }
}

fn is_sentinel(value: &str) -> bool {
    value.is_empty() || SENTINELS.iter().any(|s| value.eq_ignore_ascii_case(s))
}

/// Deserialize a text field that an export may have written as a string,
/// a number, a boolean, or `null`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Stable goal identifier assigned at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct GoalId(pub String);

impl GoalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for GoalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(GoalId(lenient_text(deserializer)?.unwrap_or_default()))
    }
}

/// A goal with its nested milestones and KPIs, as produced by ingestion.
///
/// Field names follow the ingestion export keys. Every text field is
/// optional; use the accessor methods to read them with missing values
/// already resolved to `""`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalRecord {
    #[serde(rename = "goal_id", default)]
    pub id: GoalId,
    #[serde(rename = "goal_title", default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(rename = "goal_description", default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(rename = "goal_owner", default, deserialize_with = "lenient_text")]
    pub owner: Option<String>,
    #[serde(rename = "goal_department", default, deserialize_with = "lenient_text")]
    pub department: Option<String>,
    /// Free-text health status; see [`HealthCategory`] for the canonical values.
    #[serde(rename = "goal_health", default, deserialize_with = "lenient_text")]
    pub health: Option<String>,
    #[serde(rename = "goal_last_update", default, deserialize_with = "lenient_text")]
    pub last_update: Option<String>,
    #[serde(rename = "goal_end_date", default, deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    /// Insertion order is preserved but carries no ranking meaning.
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    /// Document embedding shipped with the corpus, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,
}

impl GoalRecord {
    pub fn title(&self) -> &str {
        field_text(&self.title)
    }

    pub fn description(&self) -> &str {
        field_text(&self.description)
    }

    pub fn owner(&self) -> &str {
        field_text(&self.owner)
    }

    pub fn department(&self) -> &str {
        field_text(&self.department)
    }

    pub fn health(&self) -> &str {
        field_text(&self.health)
    }

    pub fn last_update(&self) -> &str {
        field_text(&self.last_update)
    }

    pub fn end_date(&self) -> &str {
        field_text(&self.end_date)
    }

    /// Canonical health category of the goal itself, if recognizable.
    pub fn health_category(&self) -> Option<HealthCategory> {
        HealthCategory::from_status(self.health())
    }
}

/// A milestone owned by its parent goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub health: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_update: Option<String>,
}

impl Milestone {
    pub fn title(&self) -> &str {
        field_text(&self.title)
    }

    pub fn description(&self) -> &str {
        field_text(&self.description)
    }

    pub fn owner(&self) -> &str {
        field_text(&self.owner)
    }

    pub fn health(&self) -> &str {
        field_text(&self.health)
    }

    pub fn end_date(&self) -> &str {
        field_text(&self.end_date)
    }

    pub fn last_update(&self) -> &str {
        field_text(&self.last_update)
    }

    pub fn health_category(&self) -> Option<HealthCategory> {
        HealthCategory::from_status(self.health())
    }
}

/// A KPI owned by its parent goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kpi {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub health: Option<String>,
}

impl Kpi {
    pub fn title(&self) -> &str {
        field_text(&self.title)
    }

    pub fn description(&self) -> &str {
        field_text(&self.description)
    }

    pub fn health(&self) -> &str {
        field_text(&self.health)
    }
}

/// Canonical health categories that colloquial query terms map onto.
///
/// Source data uses an open vocabulary; statuses outside these categories
/// are kept verbatim on the record and simply never match a health query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum HealthCategory {
    Behind,
    AtRisk,
    OnTrack,
    Exceeded,
    Achieved,
    NotStarted,
    NotTracked,
}

impl HealthCategory {
    /// Map a free-text status (`"At Risk"`, `"on_track"`, `"Behind"`) onto a category.
    pub fn from_status(status: &str) -> Option<Self> {
        let normalized: String = status
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        if normalized.is_empty() {
            return None;
        }
        Self::from_str(&normalized).ok()
    }
}

/// Admission band a ranked record was accepted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Blended score cleared the primary threshold.
    Primary,
    /// Rescued by lexical evidence despite a weak blended score.
    Secondary,
}

/// A goal annotated with its per-query scores. Never persisted.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: Arc<GoalRecord>,
    /// Normalized similarity in [0, 1], higher is better.
    pub semantic_score: f32,
    /// Lexical relevance in [0, 1].
    pub keyword_score: f32,
    /// `alpha * semantic + (1 - alpha) * keyword`.
    pub hybrid_score: f32,
    pub tier: Tier,
}

/// How the vector retriever's raw scores should be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// Euclidean distance, lower is better.
    #[default]
    L2Distance,
    /// Cosine or dot-product similarity, higher is better.
    Similarity,
}

/// One nearest neighbor as returned by a vector retriever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position in the record store.
    pub index: usize,
    /// Raw score on the retriever's own [`ScoreScale`].
    pub score: f32,
}

/// A single prompt sent to a text-generation provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Raw text returned by a text-generation provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_text_resolves_sentinels_to_empty() {
        assert_eq!(field_text(&None), "");
        assert_eq!(field_text(&Some("NaN".into())), "");
        assert_eq!(field_text(&Some("  none ".into())), "");
        assert_eq!(field_text(&Some("".into())), "");
        assert_eq!(field_text(&Some(" Sarah Chen ".into())), "Sarah Chen");
    }

    #[test]
    fn health_category_from_free_text() {
        assert_eq!(HealthCategory::from_status("Behind"), Some(HealthCategory::Behind));
        assert_eq!(HealthCategory::from_status("At Risk"), Some(HealthCategory::AtRisk));
        assert_eq!(HealthCategory::from_status("at-risk"), Some(HealthCategory::AtRisk));
        assert_eq!(HealthCategory::from_status("on_track"), Some(HealthCategory::OnTrack));
        assert_eq!(HealthCategory::from_status("Not started"), Some(HealthCategory::NotStarted));
        assert_eq!(HealthCategory::from_status("paused"), None);
        assert_eq!(HealthCategory::from_status(""), None);
    }

    #[test]
    fn health_category_display_is_kebab_case() {
        assert_eq!(HealthCategory::AtRisk.to_string(), "at-risk");
        assert_eq!(HealthCategory::NotTracked.to_string(), "not-tracked");
    }

    #[test]
    fn goal_record_deserializes_export_keys() {
        let json = r#"{
            "goal_id": 42,
            "goal_title": "Launch EU region",
            "goal_owner": "Sarah Chen",
            "goal_department": "Engineering",
            "goal_health": "on track",
            "goal_last_update": null,
            "milestones": [{"title": "Pick datacenter", "health": "behind"}],
            "kpis": [{"title": "Latency p99", "description": 250}]
        }"#;
        let record: GoalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "42");
        assert_eq!(record.title(), "Launch EU region");
        assert_eq!(record.last_update(), "");
        assert_eq!(record.health_category(), Some(HealthCategory::OnTrack));
        assert_eq!(record.milestones[0].health_category(), Some(HealthCategory::Behind));
        assert_eq!(record.kpis[0].description(), "250");
        assert!(record.embedding.is_empty());
    }

    #[test]
    fn goal_record_tolerates_missing_fields() {
        let record: GoalRecord = serde_json::from_str("{}").unwrap();
        assert!(record.id.is_empty());
        assert_eq!(record.title(), "");
        assert!(record.milestones.is_empty());
    }

    #[test]
    fn score_scale_parses_snake_case() {
        let scale: ScoreScale = serde_json::from_str("\"l2_distance\"").unwrap();
        assert_eq!(scale, ScoreScale::L2Distance);
        assert_eq!(ScoreScale::Similarity.to_string(), "similarity");
    }
}
