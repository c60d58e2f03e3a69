// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goalscope - ask natural-language questions about organizational goals.
//!
//! This is the binary entry point.

mod ask;
mod config_cmd;
mod output;
mod search;
mod stats;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use goalscope_config::{ConfigError, GoalscopeConfig};
use goalscope_core::GoalscopeError;

/// Goalscope - ask natural-language questions about organizational goals.
#[derive(Parser, Debug)]
#[command(name = "goalscope", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank goals for a query.
    Search {
        /// The question or search phrase.
        #[arg(short, long)]
        query: String,
        /// Print results as JSON.
        #[arg(long)]
        json: bool,
        /// Show at most this many results.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Rank goals and summarize them into an answer.
    Ask {
        /// The question.
        #[arg(short, long)]
        query: String,
        /// Print the answer and results as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show corpus and index statistics with a data-quality report.
    Stats {
        /// Print statistics as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate and print the effective configuration.
    Config,
}

/// Exit code for configuration errors.
const EXIT_CONFIG: u8 = 1;
/// Exit code when the corpus or index must be re-provisioned.
const EXIT_NOT_READY: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            goalscope_config::render_errors(&errors);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    init_tracing(&config.logging.level);

    let result = match cli.command {
        Commands::Search { query, json, limit } => {
            search::run_search(&config, &query, limit, json, cli.plain).await
        }
        Commands::Ask { query, json } => ask::run_ask(&config, &query, json, cli.plain).await,
        Commands::Stats { json } => stats::run_stats(&config, json, cli.plain).await,
        Commands::Config => config_cmd::run_config(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_not_ready() => {
            eprintln!("goalscope: {e}");
            eprintln!(
                "goalscope: re-run ingestion to rebuild {} (retrying will not help)",
                config.corpus.path
            );
            ExitCode::from(EXIT_NOT_READY)
        }
        Err(e @ GoalscopeError::Config(_)) => {
            eprintln!("goalscope: {e}");
            ExitCode::from(EXIT_CONFIG)
        }
        Err(e) => {
            eprintln!("goalscope: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<GoalscopeConfig, Vec<ConfigError>> {
    match path {
        Some(path) => goalscope_config::load_and_validate_path(path),
        None => goalscope_config::load_and_validate(),
    }
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("goalscope={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
