// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `goalscope stats` - corpus and index statistics.

use goalscope_config::GoalscopeConfig;
use goalscope_core::GoalscopeError;
use goalscope_search::{IndexStats, QualityReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatsOutput {
    index: IndexStats,
    quality: QualityReport,
}

pub async fn run_stats(
    config: &GoalscopeConfig,
    json: bool,
    plain: bool,
) -> Result<(), GoalscopeError> {
    let engine = goalscope_agent::build_search_engine(config).await?;
    let stats = StatsOutput {
        index: engine.stats(),
        quality: engine.store().quality_report(),
    };

    if json {
        crate::output::print_json(&stats);
    } else {
        print_stats(&stats, crate::output::use_color(plain));
    }
    Ok(())
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

fn print_stats(stats: &StatsOutput, use_color: bool) {
    let index = &stats.index;
    let quality = &stats.quality;

    if use_color {
        use colored::Colorize;
        println!("{}", "goalscope corpus".bold());
    } else {
        println!("goalscope corpus");
    }
    println!("  goals:       {}", index.total_goals);
    println!("  milestones:  {}", index.total_milestones);
    println!("  kpis:        {}", index.total_kpis);
    let departments: Vec<&str> = index.departments.iter().map(String::as_str).collect();
    println!("  departments: {}", departments.join(", "));
    match (&index.embedding_model, index.embedding_dimension) {
        (Some(model), Some(dim)) => println!("  embeddings:  {model} ({dim} dimensions)"),
        (Some(model), None) => println!("  embeddings:  {model}"),
        _ => println!("  embeddings:  none (lexical-only)"),
    }

    println!();
    println!("data quality");
    let total = quality.total_goals;
    println!(
        "  with owner:       {:>5.1}%",
        percent(quality.goals_with_owners, total)
    );
    println!(
        "  with department:  {:>5.1}%",
        percent(quality.goals_with_departments, total)
    );
    println!(
        "  with milestones:  {:>5.1}%",
        percent(quality.goals_with_milestones, total)
    );
    if quality.issues.is_empty() {
        return;
    }
    println!("  issues:");
    for issue in &quality.issues {
        if use_color {
            use colored::Colorize;
            println!("    {} {issue}", "!".yellow());
        } else {
            println!("    ! {issue}");
        }
    }
}
