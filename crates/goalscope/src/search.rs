// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `goalscope search` - rank goals for a query.

use goalscope_config::GoalscopeConfig;
use goalscope_core::GoalscopeError;
use goalscope_search::{RankFeedback, Ranking};
use serde::Serialize;

use crate::output::{self, ResultView};

#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    feedback: RankFeedback,
    message: String,
    results: Vec<ResultView>,
}

pub async fn run_search(
    config: &GoalscopeConfig,
    query: &str,
    limit: Option<usize>,
    json: bool,
    plain: bool,
) -> Result<(), GoalscopeError> {
    let engine = goalscope_agent::build_search_engine(config).await?;
    let mut ranking = engine.search(query).await?;
    if let Some(limit) = limit {
        ranking.truncate(limit);
    }

    if json {
        output::print_json(&search_output(query, &ranking));
    } else {
        print_ranking(&ranking, output::use_color(plain));
    }
    Ok(())
}

fn search_output<'a>(query: &'a str, ranking: &Ranking) -> SearchOutput<'a> {
    SearchOutput {
        query,
        feedback: ranking.feedback,
        message: ranking.feedback.to_string(),
        results: output::result_views(&ranking.results),
    }
}

fn print_ranking(ranking: &Ranking, use_color: bool) {
    if use_color {
        use colored::Colorize;
        println!("{}", ranking.feedback.to_string().bold());
    } else {
        println!("{}", ranking.feedback);
    }
    output::print_results(&ranking.results, use_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalscope_search::{RankingParams, RecordStore, SearchEngine};
    use goalscope_test_utils::sample_corpus;
    use std::sync::Arc;

    async fn rank(query: &str) -> Ranking {
        let store = Arc::new(RecordStore::from_records(sample_corpus()));
        SearchEngine::new(store, RankingParams::default(), 50)
            .search(query)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn json_output_carries_feedback_and_results() {
        let ranking = rank("billing migration").await;
        let json = serde_json::to_value(search_output("billing migration", &ranking)).unwrap();
        assert_eq!(json["query"], "billing migration");
        assert_eq!(json["feedback"]["kind"], "found");
        assert_eq!(json["results"][0]["title"], "Billing system migration");
        assert!(json["message"].as_str().unwrap().starts_with("Found "));
    }

    #[tokio::test]
    async fn json_output_for_no_results() {
        let ranking = rank("zzzz qqqq").await;
        let json = serde_json::to_value(search_output("zzzz qqqq", &ranking)).unwrap();
        assert_eq!(json["feedback"]["kind"], "no_results");
        assert_eq!(json["message"], "No results found");
        assert!(json["results"].as_array().unwrap().is_empty());
    }
}
