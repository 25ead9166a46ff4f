//! JSON rendering of a finished report.
//!
//! Used by `--json` for machine consumers. Field names are camelCase:
//!
//! ```text
//! {
//!   "title": "...",
//!   "sourceUrl": "...",
//!   "scores": { "positive": 0.0, "negative": 0.0, "neutral": 1.0, "compound": 0.0 },
//!   "label": "neutral",
//!   "body": "..."
//! }
//! ```

use crate::models::Report;
use tracing::{info, instrument};

/// Serialize a [`Report`] as pretty-printed JSON.
#[instrument(level = "info", skip_all, fields(source_url = %report.source_url))]
pub fn render(report: &Report) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(report)?;
    info!(bytes = json.len(), "Rendered JSON report");
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentScore;
    use crate::outputs::report::generate;

    #[test]
    fn test_render_uses_camel_case_and_lowercase_label() {
        let scores = SentimentScore {
            positive: 0.623,
            negative: 0.0,
            neutral: 0.377,
            compound: 0.765,
        };
        let report = generate("Good day", &scores, "https://example.com/good");
        let json = render(&report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Good day");
        assert_eq!(value["sourceUrl"], "https://example.com/good");
        assert_eq!(value["label"], "positive");
        assert_eq!(value["scores"]["compound"], 0.765);
        assert_eq!(value["body"], report.body.as_str());
    }
}
