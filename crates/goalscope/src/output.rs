// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal and JSON rendering shared by the commands.

use std::io::IsTerminal;

use goalscope_core::{ScoredRecord, Tier};
use serde::Serialize;

/// Colors only when asked for and writing to a terminal.
pub fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

/// One ranked goal for `--json` output.
#[derive(Debug, Serialize)]
pub struct ResultView {
    pub rank: usize,
    pub goal_id: String,
    pub title: String,
    pub owner: String,
    pub department: String,
    pub health: String,
    pub tier: Tier,
    pub hybrid_score: f32,
    pub semantic_score: f32,
    pub keyword_score: f32,
}

impl ResultView {
    pub fn new(rank: usize, scored: &ScoredRecord) -> Self {
        let r = &scored.record;
        Self {
            rank,
            goal_id: r.id.to_string(),
            title: r.title().to_string(),
            owner: r.owner().to_string(),
            department: r.department().to_string(),
            health: r.health().to_string(),
            tier: scored.tier,
            hybrid_score: scored.hybrid_score,
            semantic_score: scored.semantic_score,
            keyword_score: scored.keyword_score,
        }
    }
}

pub fn result_views<'a>(results: impl IntoIterator<Item = &'a ScoredRecord>) -> Vec<ResultView> {
    results
        .into_iter()
        .enumerate()
        .map(|(i, r)| ResultView::new(i + 1, r))
        .collect()
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Print ranked results as a numbered list.
pub fn print_results(results: &[ScoredRecord], use_color: bool) {
    for (i, scored) in results.iter().enumerate() {
        let r = &scored.record;
        let title = or_dash(r.title());
        let tier = match scored.tier {
            Tier::Primary => "",
            Tier::Secondary => " (secondary)",
        };
        if use_color {
            use colored::Colorize;
            println!(
                "  {:>2}. {}{}",
                i + 1,
                title.bold(),
                tier.dimmed()
            );
        } else {
            println!("  {:>2}. {title}{tier}", i + 1);
        }
        println!(
            "      owner: {}  department: {}  health: {}",
            or_dash(r.owner()),
            or_dash(r.department()),
            or_dash(r.health())
        );
        println!(
            "      score: {:.3} (semantic {:.3}, keyword {:.3})",
            scored.hybrid_score, scored.semantic_score, scored.keyword_score
        );
    }
}
