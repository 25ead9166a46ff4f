//! Sentiment scoring behind a swappable capability.
//!
//! The pipeline only knows the [`SentimentScorer`] trait. Engines:
//!
//! | Engine | Module | Notes |
//! |--------|--------|-------|
//! | VADER | [`vader`] | Default. `vader_sentiment` lexicon and rules, no I/O |
//! | LLM | `llm` | Behind the `llm` feature. OpenAI-compatible API via `awful_aj` |
//!
//! Whatever the engine, its output is checked with
//! [`SentimentScore::validate`] before a report is built from it.

use crate::error::PipelineError;
use crate::models::{ArticleSource, SentimentScore};
use std::error::Error;
use std::time::Instant;
use tracing::{info, instrument, warn};

#[cfg(feature = "llm")]
pub mod llm;
pub mod vader;

/// Scores a block of text.
pub trait SentimentScorer {
    /// Short engine name used in logs.
    fn name(&self) -> &str;

    /// Score `text` exactly as given.
    async fn score(&self, text: &str) -> Result<SentimentScore, Box<dyn Error>>;
}

/// Score extracted article text and validate the result.
///
/// Scorer failures and malformed scores both become
/// [`PipelineError::Scoring`], since the article text could not be scored.
#[instrument(level = "info", skip_all, fields(scorer = scorer.name(), url = %source))]
pub async fn score_article<S: SentimentScorer>(
    scorer: &S,
    source: &ArticleSource,
    text: &str,
) -> Result<SentimentScore, PipelineError> {
    let t0 = Instant::now();
    let scoring_error = |reason: String| PipelineError::Scoring {
        url: source.as_str().to_string(),
        reason,
    };

    let scores = scorer.score(text).await.map_err(|e| {
        warn!(error = %e, "Scorer rejected article text");
        scoring_error(e.to_string())
    })?;

    if let Err(reason) = scores.validate() {
        warn!(?scores, %reason, "Scorer returned an invalid score");
        return Err(scoring_error(format!("invalid score: {reason}")));
    }

    info!(
        positive = scores.positive,
        negative = scores.negative,
        neutral = scores.neutral,
        compound = scores.compound,
        elapsed_ms = t0.elapsed().as_millis(),
        "Scored article text"
    );
    Ok(scores)
}
