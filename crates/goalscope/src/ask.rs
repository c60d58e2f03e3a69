// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `goalscope ask` - answer a question from the ranked goals.

use goalscope_agent::{Answer, QueryAnswer};
use goalscope_config::GoalscopeConfig;
use goalscope_core::GoalscopeError;
use serde::Serialize;

use crate::output::{self, ResultView};

#[derive(Debug, Serialize)]
struct AskOutput<'a> {
    query: &'a str,
    answer: &'a str,
    model: Option<&'a str>,
    /// False when nothing matched or every model failed.
    generated: bool,
    context_records: usize,
    results: Vec<ResultView>,
}

pub async fn run_ask(
    config: &GoalscopeConfig,
    query: &str,
    json: bool,
    plain: bool,
) -> Result<(), GoalscopeError> {
    let pipeline = goalscope_agent::build_pipeline(config).await?;
    let result = pipeline.ask(query).await?;

    if json {
        output::print_json(&ask_output(query, &result));
    } else {
        print_answer(&result, output::use_color(plain));
    }
    Ok(())
}

fn ask_output<'a>(query: &'a str, result: &'a QueryAnswer) -> AskOutput<'a> {
    let generated = matches!(&result.answer, Answer::Generated(g) if g.is_available());
    AskOutput {
        query,
        answer: result.answer.text(),
        model: result.answer.model(),
        generated,
        context_records: result.context_records,
        results: output::result_views(&result.ranking.results),
    }
}

fn print_answer(result: &QueryAnswer, use_color: bool) {
    println!("{}", result.answer.text());
    if let Some(model) = result.answer.model() {
        if use_color {
            use colored::Colorize;
            println!("{}", format!("(answered by {model})").dimmed());
        } else {
            println!("(answered by {model})");
        }
    }
    if result.ranking.is_empty() {
        return;
    }
    println!();
    println!("{}:", result.ranking.feedback);
    output::print_results(&result.ranking.results, use_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalscope_llm::GeneratedAnswer;
    use goalscope_search::{RankFeedback, Ranking};

    fn empty_ranking() -> Ranking {
        Ranking {
            results: Vec::new(),
            feedback: RankFeedback::NoResults,
        }
    }

    #[test]
    fn no_matches_is_not_generated() {
        let result = QueryAnswer {
            ranking: empty_ranking(),
            answer: Answer::NoMatches,
            context_records: 0,
        };
        let json = serde_json::to_value(ask_output("q", &result)).unwrap();
        assert_eq!(json["generated"], false);
        assert_eq!(json["answer"], goalscope_agent::NO_MATCH_ANSWER);
        assert!(json["model"].is_null());
    }

    #[test]
    fn generated_answer_reports_model() {
        let result = QueryAnswer {
            ranking: empty_ranking(),
            answer: Answer::Generated(GeneratedAnswer::Answer {
                text: "Two goals are behind.".into(),
                model: "llama-3.1-8b-instant".into(),
            }),
            context_records: 2,
        };
        let json = serde_json::to_value(ask_output("q", &result)).unwrap();
        assert_eq!(json["generated"], true);
        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert_eq!(json["context_records"], 2);
    }

    #[test]
    fn unavailable_answer_is_not_generated() {
        let result = QueryAnswer {
            ranking: empty_ranking(),
            answer: Answer::Generated(GeneratedAnswer::Unavailable),
            context_records: 1,
        };
        let json = serde_json::to_value(ask_output("q", &result)).unwrap();
        assert_eq!(json["generated"], false);
        assert_eq!(json["answer"], goalscope_llm::UNAVAILABLE_MESSAGE);
    }
}
