//! VADER sentiment engine.
//!
//! Wraps [`vader_sentiment::SentimentIntensityAnalyzer`], a port of the
//! reference VADER implementation with its full valence lexicon, booster and
//! negation rules. The analyzer reports `pos`, `neg`, `neu` and `compound`
//! in a map. They are copied into a [`SentimentScore`] with the proportions
//! rounded to three decimals and the compound to four.

use crate::models::SentimentScore;
use crate::sentiment::SentimentScorer;
use crate::utils::round3;
use std::collections::HashMap;
use std::error::Error;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Score of text with no scoreable tokens.
const ALL_NEUTRAL: SentimentScore = SentimentScore {
    positive: 0.0,
    negative: 0.0,
    neutral: 1.0,
    compound: 0.0,
};

/// [`SentimentScorer`] backed by the VADER lexicon.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl VaderScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `text` synchronously.
    ///
    /// # Errors
    ///
    /// Fails only if the analyzer's result is missing one of its four keys.
    pub fn polarity_scores(&self, text: &str) -> Result<SentimentScore, String> {
        if text.trim().is_empty() {
            return Ok(ALL_NEUTRAL);
        }
        from_polarity_map(&self.analyzer.polarity_scores(text))
    }
}

/// Map the analyzer's `pos`/`neg`/`neu`/`compound` entries onto a score.
///
/// The analyzer reports all zeros when no token survived tokenization. That
/// is read as fully neutral so the proportions still sum to one.
fn from_polarity_map(map: &HashMap<&str, f64>) -> Result<SentimentScore, String> {
    let field = |key: &str| {
        map.get(key)
            .copied()
            .ok_or_else(|| format!("analyzer result has no `{key}` entry"))
    };
    let (positive, negative, neutral) = (field("pos")?, field("neg")?, field("neu")?);
    let compound = field("compound")?;

    if positive + negative + neutral == 0.0 {
        return Ok(ALL_NEUTRAL);
    }
    Ok(SentimentScore {
        positive: round3(positive),
        negative: round3(negative),
        neutral: round3(neutral),
        compound: (compound * 10_000.0).round() / 10_000.0,
    })
}

impl SentimentScorer for VaderScorer {
    fn name(&self) -> &str {
        "vader"
    }

    async fn score(&self, text: &str) -> Result<SentimentScore, Box<dyn Error>> {
        Ok(self.polarity_scores(text)?)
    }
}
