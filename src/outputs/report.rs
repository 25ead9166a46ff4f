//! Plain-text sentiment report.
//!
//! The body is a fixed template:
//!
//! ```text
//! Sentiment Analysis Report: {title}
//! Source Article URL: {url}
//!
//! <preamble>
//!
//! Key Sentiment Indicators:
//! - Positive sentiment: 0.000
//! - Negative sentiment: 0.000
//! - Neutral sentiment: 0.000
//! - Compound sentiment score: 0.000
//!
//! <overall feeling> Specifically:
//! <restatement of positive, negative and neutral>
//!
//! <conclusion naming the label>
//! <disclaimer>
//! ```
//!
//! Every score is printed with exactly three decimals. Output depends only
//! on the arguments, so identical inputs give byte-identical reports.

use crate::models::{Report, SentimentScore};
use tracing::{debug, instrument};

const PREAMBLE: &str = "This report details the sentiment analysis performed on the text of the news article. \
The analysis aimed to determine the overall emotional tone and perspective conveyed by the writing.";

const DISCLAIMER: &str = "It's important to note that sentiment analysis provides a general overview, \
and subtle nuances in human language might not be fully captured.\n\
The compound score provides a single metric summarizing the overall sentiment, \
but the individual positive, negative, and neutral scores offer a more detailed understanding.";

/// Build a [`Report`] from a title, scores and the article URL.
///
/// The label follows [`SentimentScore::label`]: compound `>= 0.05` is
/// positive, `<= -0.05` is negative, anything else neutral.
#[instrument(level = "debug", skip_all, fields(%source_url))]
pub fn generate(title: &str, scores: &SentimentScore, source_url: &str) -> Report {
    let label = scores.label();
    let SentimentScore {
        positive,
        negative,
        neutral,
        compound,
    } = *scores;

    let body = format!(
        "Sentiment Analysis Report: {title}\n\
         Source Article URL: {source_url}\n\
         \n\
         {PREAMBLE}\n\
         \n\
         Key Sentiment Indicators:\n\
         - Positive sentiment: {positive:.3}\n\
         - Negative sentiment: {negative:.3}\n\
         - Neutral sentiment: {neutral:.3}\n\
         - Compound sentiment score: {compound:.3}\n\
         \n\
         {feeling} Specifically:\n\
         The positive sentiment is measured at {positive:.3}, indicating the presence of favorable language. \
         Conversely, the negative sentiment is {negative:.3}, showing the extent of unfavorable expressions. \
         The neutral sentiment, with a score of {neutral:.3}, reflects the portion of the text that lacks strong emotional coloring.\n\
         \n\
         In conclusion, the sentiment analysis suggests that the article's tone is primarily {label}. \
         {DISCLAIMER}",
        feeling = label.overall_feeling(),
    );
    debug!(%label, bytes = body.len(), "Generated report");

    Report {
        title: title.to_string(),
        source_url: source_url.to_string(),
        scores: *scores,
        label,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentLabel;

    const URL: &str = "https://www.bbc.com/news/world-us-canada-68840552";

    fn scores(compound: f64) -> SentimentScore {
        SentimentScore {
            positive: 0.123_456,
            negative: 0.0456,
            neutral: 0.830_944,
            compound,
        }
    }

    #[test]
    fn test_report_is_idempotent() {
        let s = scores(0.3);
        let first = generate("Bridge collapse", &s, URL);
        let second = generate("Bridge collapse", &s, URL);
        assert_eq!(first.body.as_bytes(), second.body.as_bytes());
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_names_title_and_url() {
        let report = generate("Bridge collapse", &scores(0.0), URL);
        let mut lines = report.body.lines();
        assert_eq!(lines.next(), Some("Sentiment Analysis Report: Bridge collapse"));
        assert_eq!(lines.next(), Some(format!("Source Article URL: {URL}").as_str()));
        assert_eq!(report.title, "Bridge collapse");
        assert_eq!(report.source_url, URL);
    }

    #[test]
    fn test_scores_listed_with_three_decimals() {
        let report = generate("t", &scores(-0.5678), URL);
        assert!(report.body.contains("- Positive sentiment: 0.123\n"));
        assert!(report.body.contains("- Negative sentiment: 0.046\n"));
        assert!(report.body.contains("- Neutral sentiment: 0.831\n"));
        assert!(report.body.contains("- Compound sentiment score: -0.568\n"));
    }

    #[test]
    fn test_restatement_names_each_proportion() {
        let report = generate("t", &scores(0.2), URL);
        assert!(report.body.contains("positive sentiment is measured at 0.123"));
        assert!(report.body.contains("negative sentiment is 0.046"));
        assert!(report.body.contains("neutral sentiment, with a score of 0.831"));
    }

    #[test]
    fn test_label_thresholds_in_report() {
        let cases = [
            (0.05, SentimentLabel::Positive),
            (0.0499999, SentimentLabel::Neutral),
            (-0.05, SentimentLabel::Negative),
            (-0.0499999, SentimentLabel::Neutral),
        ];
        for (compound, expected) in cases {
            let report = generate("t", &scores(compound), URL);
            assert_eq!(report.label, expected, "compound = {compound}");
            let closing = format!("the article's tone is primarily {expected}.");
            assert!(report.body.contains(&closing), "{}", report.body);
            assert!(report.body.contains(expected.overall_feeling()));
        }
    }

    #[test]
    fn test_body_ends_with_disclaimer() {
        let report = generate("t", &scores(0.0), URL);
        assert!(report.body.contains("subtle nuances in human language"));
        assert!(report.body.ends_with("offer a more detailed understanding."));
    }

    #[test]
    fn test_zero_scores_print_as_fixed_decimals() {
        let zero = SentimentScore {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
        };
        let report = generate("t", &zero, URL);
        assert!(report.body.contains("- Positive sentiment: 0.000\n"));
        assert!(report.body.contains("- Neutral sentiment: 1.000\n"));
        assert!(report.body.contains("- Compound sentiment score: 0.000\n"));
    }
}
