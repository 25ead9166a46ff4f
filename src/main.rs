//! # Article Sentiment
//!
//! Fetches a single web article, extracts its readable text, scores its
//! sentiment and prints a human-readable report.
//!
//! ## Usage
//!
//! ```sh
//! article_sentiment https://www.bbc.com/news/world-us-canada-68840552 \
//!     -t "Baltimore bridge collapse: Search for survivors paused"
//! ```
//!
//! ## Architecture
//!
//! The application is a linear pipeline with no shared state:
//! 1. **Extraction**: One bounded-timeout fetch, then an ordered chain of
//!    content-location strategies over the parsed HTML
//! 2. **Scoring**: The text goes unmodified to a pluggable sentiment scorer
//! 3. **Report**: A fixed template with three-decimal scores and a label
//!
//! The report goes to stdout. Logs and the one-line failure diagnostic go
//! to stderr, and any failure exits non-zero without printing a report.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod sentiment;
mod utils;

use cli::{Cli, ScorerKind};
use error::PipelineError;
use scrapers::HttpFetcher;
use sentiment::SentimentScorer;
use sentiment::vader::VaderScorer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();

    // --- Tracing init ---
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "article_sentiment starting up");
    debug!(
        url = %args.url,
        title = %args.title,
        timeout = args.timeout,
        scorer = ?args.scorer,
        llm_template = %args.llm_template,
        json = args.json,
        "Parsed CLI arguments"
    );

    match run(&args).await {
        Ok(output) => {
            println!("{output}");
            info!(elapsed_ms = start_time.elapsed().as_millis(), "Execution complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = ?e, "Execution failed");
            eprintln!("{}", diagnostic(&*e));
            ExitCode::FAILURE
        }
    }
}

/// One-line stderr message for a failed run. Pipeline failures name their
/// kind, and their message carries the article URL.
fn diagnostic(e: &(dyn Error + 'static)) -> String {
    let line = match e.downcast_ref::<PipelineError>() {
        Some(failure) => format!("Error ({}): {e}", failure.kind().as_str()),
        None => format!("Error: {e}"),
    };
    line.replace(['\r', '\n'], " ")
}

/// Build the fetcher and scorer, run the pipeline and render its output.
async fn run(args: &Cli) -> Result<String, Box<dyn Error>> {
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout))?;

    match args.scorer {
        ScorerKind::Vader => execute(&fetcher, &VaderScorer::new(), args).await,
        #[cfg(feature = "llm")]
        ScorerKind::Llm => {
            let scorer = sentiment::llm::LlmScorer::load(&args.llm_template).await?;
            execute(&fetcher, &scorer, args).await
        }
        #[cfg(not(feature = "llm"))]
        ScorerKind::Llm => Err("the llm scorer requires building with `--features llm`".into()),
    }
}

async fn execute<S: SentimentScorer>(
    fetcher: &HttpFetcher,
    scorer: &S,
    args: &Cli,
) -> Result<String, Box<dyn Error>> {
    let report = pipeline::run(fetcher, scorer, &args.url, &args.title).await?;
    if args.json {
        Ok(outputs::json::render(&report)?)
    } else {
        Ok(report.body)
    }
}
