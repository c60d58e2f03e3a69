// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context assembly for Goalscope answers.
//!
//! Turns a ranked result list into the text block the answer generator
//! reads, and wraps it with the user's question in the prompt template.

pub mod assembler;
pub mod prompt;

use goalscope_config::model::GeneratorConfig;
use goalscope_core::ScoredRecord;

pub use assembler::{MAX_MILESTONES, NO_DATA, RECORD_SEPARATOR, assemble, render_block, split_blocks};
pub use prompt::{SYSTEM_PROMPT, build_prompt};

/// Everything the generator needs for one question.
#[derive(Debug, Clone)]
pub struct AssembledContext {
    /// The rendered goal blocks, or [`NO_DATA`].
    pub context: String,
    /// The full user prompt.
    pub prompt: String,
    pub system_prompt: &'static str,
    /// How many ranked records made it into the context.
    pub records_used: usize,
}

/// Builds prompts from ranked results, limited to the top `max_records`.
#[derive(Debug, Clone)]
pub struct ContextEngine {
    max_records: usize,
}

impl ContextEngine {
    pub fn new(max_records: usize) -> Self {
        Self {
            max_records: max_records.max(1),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.max_context_records)
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    pub fn assemble(&self, query: &str, results: &[ScoredRecord]) -> AssembledContext {
        let context = assemble(results, self.max_records);
        let records_used = results.len().min(self.max_records);
        tracing::debug!(records_used, chars = context.len(), "context assembled");
        AssembledContext {
            prompt: build_prompt(query, &context),
            context,
            system_prompt: SYSTEM_PROMPT,
            records_used,
        }
    }
}
