//! Data models for one run of the article sentiment pipeline.
//!
//! This module defines the values that flow through the pipeline:
//! - [`ArticleSource`]: The validated article URL given on the command line
//! - [`SentimentScore`]: The four-valued score returned by a scorer
//! - [`SentimentLabel`]: The polarity label derived from the compound score
//! - [`Report`]: The rendered report handed to the output sink
//!
//! Every value is created, consumed and dropped within a single run.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Compound scores at or above this value are labelled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this value are labelled negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;
/// Allowed drift of `positive + negative + neutral` away from 1.0.
pub const SUM_TOLERANCE: f64 = 0.01;

/// The article to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSource {
    /// Absolute http(s) URL of the article.
    pub url: Url,
}

impl ArticleSource {
    /// Parse and validate an article URL.
    ///
    /// Only absolute `http` and `https` URLs are accepted. Reachability is
    /// not checked here; fetch failures are reported by the extractor.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let url = Url::parse(raw.trim()).map_err(|e| format!("invalid URL '{raw}': {e}"))?;
        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(Self { url }),
            "http" | "https" => Err(format!("URL '{raw}' has no host")),
            other => Err(format!("unsupported URL scheme '{other}' in '{raw}'")),
        }
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ArticleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Sentiment scores for a block of text.
///
/// `positive`, `negative` and `neutral` are proportions in `[0, 1]` that
/// sum to roughly 1.0. `compound` is a normalized polarity in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SentimentScore {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
}

impl SentimentScore {
    /// Check that a scorer returned a usable shape.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint: a
    /// non-finite field, a field out of range, or proportions that do not
    /// sum to 1.0 within [`SUM_TOLERANCE`].
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("positive", self.positive, 0.0, 1.0),
            ("negative", self.negative, 0.0, 1.0),
            ("neutral", self.neutral, 0.0, 1.0),
            ("compound", self.compound, -1.0, 1.0),
        ];
        for (name, value, low, high) in fields {
            if !value.is_finite() {
                return Err(format!("{name} score is not a finite number"));
            }
            if value < low || value > high {
                return Err(format!("{name} score {value} is outside [{low}, {high}]"));
            }
        }

        let sum = self.positive + self.negative + self.neutral;
        if (sum - 1.0).abs() >= SUM_TOLERANCE {
            return Err(format!(
                "positive + negative + neutral = {sum:.4}, expected 1.0"
            ));
        }
        Ok(())
    }

    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

/// Overall polarity of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Select a label from a compound score.
    ///
    /// The checks run in order: `>= 0.05` is positive, `<= -0.05` is
    /// negative, anything else is neutral.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            Self::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// One-sentence summary of the overall tone, used in the report body.
    pub fn overall_feeling(&self) -> &'static str {
        match self {
            Self::Positive => "The article conveys a generally positive sentiment.",
            Self::Negative => "The article expresses a predominantly negative sentiment.",
            Self::Neutral => "The article presents a largely neutral perspective.",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished sentiment report.
///
/// Derived purely from the title, the source URL and the scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    pub source_url: String,
    pub scores: SentimentScore,
    pub label: SentimentLabel,
    pub body: String,
}
