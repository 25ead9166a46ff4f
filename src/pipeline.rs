//! The linear extract → score → report pipeline.
//!
//! One invocation handles one article and shares nothing with any other.
//! Scoring is only attempted once extraction has succeeded.

use crate::error::PipelineError;
use crate::models::{ArticleSource, Report};
use crate::outputs::report;
use crate::scrapers::Fetcher;
use crate::scrapers::article::extract;
use crate::sentiment::{SentimentScorer, score_article};
use std::time::Instant;
use tracing::{info, instrument};

/// Fetch, extract, score and report on a single article.
///
/// # Errors
///
/// Returns [`PipelineError::Extraction`] when the article could not be
/// fetched or no text was found, and [`PipelineError::Scoring`] when the
/// scorer failed or returned an invalid score.
#[instrument(level = "info", skip_all, fields(url = %source, %title))]
pub async fn run<F, S>(
    fetcher: &F,
    scorer: &S,
    source: &ArticleSource,
    title: &str,
) -> Result<Report, PipelineError>
where
    F: Fetcher,
    S: SentimentScorer,
{
    let t0 = Instant::now();
    let text = extract(fetcher, source).await?;
    let scores = score_article(scorer, source, &text).await?;
    let report = report::generate(title, &scores, source.as_str());
    info!(
        label = %report.label,
        elapsed_ms = t0.elapsed().as_millis(),
        "Pipeline complete"
    );
    Ok(report)
}
