// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The question-answering pipeline: rank goals, assemble context, and
//! summarize with the language model.

use goalscope_context::ContextEngine;
use goalscope_core::GoalscopeError;
use goalscope_llm::{AnswerGenerator, GeneratedAnswer};
use goalscope_search::{Ranking, SearchEngine};
use tracing::info;

/// Returned without calling the model when nothing ranked.
pub const NO_MATCH_ANSWER: &str =
    "I couldn't find any relevant goals or milestones for your query.";

/// How a question was answered.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Ranking came back empty; the model was not consulted.
    NoMatches,
    Generated(GeneratedAnswer),
}

impl Answer {
    pub fn text(&self) -> &str {
        match self {
            Self::NoMatches => NO_MATCH_ANSWER,
            Self::Generated(generated) => generated.text(),
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Self::NoMatches => None,
            Self::Generated(generated) => generated.model(),
        }
    }
}

/// Ranked results plus the answer built from them.
///
/// The ranking is always present, so callers can show results even when
/// the model was unavailable.
#[derive(Debug, Clone)]
pub struct QueryAnswer {
    pub ranking: Ranking,
    pub answer: Answer,
    /// Number of ranked goals rendered into the prompt.
    pub context_records: usize,
}

pub struct QueryPipeline {
    engine: SearchEngine,
    context: ContextEngine,
    generator: AnswerGenerator,
}

impl QueryPipeline {
    pub fn new(engine: SearchEngine, context: ContextEngine, generator: AnswerGenerator) -> Self {
        Self {
            engine,
            context,
            generator,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Rank goals for `query` without generating an answer.
    pub async fn search(&self, query: &str) -> Result<Ranking, GoalscopeError> {
        self.engine.search(query).await
    }

    /// Rank goals and answer the question.
    ///
    /// Only search failures are errors. An empty ranking answers with
    /// [`NO_MATCH_ANSWER`]; model failures answer with the unavailability
    /// message.
    pub async fn ask(&self, query: &str) -> Result<QueryAnswer, GoalscopeError> {
        let ranking = self.engine.search(query).await?;

        if ranking.is_empty() {
            metrics::counter!("goalscope_answers_total", "outcome" => "no_matches").increment(1);
            info!("no ranked goals, skipping generation");
            return Ok(QueryAnswer {
                ranking,
                answer: Answer::NoMatches,
                context_records: 0,
            });
        }

        let assembled = self.context.assemble(query, &ranking.results);
        let generated = self
            .generator
            .generate(assembled.system_prompt, &assembled.prompt)
            .await;

        let outcome = if generated.is_available() {
            "generated"
        } else {
            "unavailable"
        };
        metrics::counter!("goalscope_answers_total", "outcome" => outcome).increment(1);

        Ok(QueryAnswer {
            ranking,
            answer: Answer::Generated(generated),
            context_records: assembled.records_used,
        })
    }
}
