//! Command-line interface definitions.
//!
//! The article URL and its title are both supplied by the user; nothing
//! is hardcoded and no title is scraped from the page.

use crate::models::ArticleSource;
use crate::scrapers::DEFAULT_TIMEOUT_SECS;
use clap::{ArgAction, Parser, ValueEnum};

/// Sentiment engine to score the article with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScorerKind {
    /// Built-in VADER lexicon scorer
    Vader,
    /// OpenAI-compatible LLM via awful_aj (requires the `llm` feature)
    Llm,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// article_sentiment https://www.bbc.com/news/world-us-canada-68840552 \
///     --title "Baltimore bridge collapse: Search for survivors paused"
///
/// # JSON output with a longer timeout
/// article_sentiment https://example.com/story -t "Story" --json --timeout 30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Absolute http(s) URL of the article to analyze
    #[arg(value_parser = ArticleSource::parse)]
    pub url: ArticleSource,

    /// Title to print in the report header
    #[arg(short, long)]
    pub title: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Sentiment engine
    #[arg(long, value_enum, default_value_t = ScorerKind::Vader)]
    pub scorer: ScorerKind,

    /// awful_aj template used by the LLM scorer
    #[arg(long, default_value = "sentiment_scorer")]
    pub llm_template: String,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default tracing filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.bbc.com/news/world-us-canada-68840552";

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "article_sentiment",
            URL,
            "--title",
            "Baltimore bridge collapse: Search for survivors paused",
        ]);

        assert_eq!(cli.url.as_str(), URL);
        assert_eq!(cli.title, "Baltimore bridge collapse: Search for survivors paused");
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.scorer, ScorerKind::Vader);
        assert!(!cli.json);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_cli_short_flags_and_options() {
        let cli = Cli::parse_from([
            "article_sentiment",
            URL,
            "-t",
            "Title",
            "--timeout",
            "30",
            "--scorer",
            "llm",
            "--json",
            "-vv",
        ]);

        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.scorer, ScorerKind::Llm);
        assert!(cli.json);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_cli_rejects_invalid_url() {
        let result = Cli::try_parse_from(["article_sentiment", "/relative/path", "-t", "T"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_title() {
        let result = Cli::try_parse_from(["article_sentiment", URL]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_zero_timeout() {
        let result = Cli::try_parse_from(["article_sentiment", URL, "-t", "T", "--timeout", "0"]);
        assert!(result.is_err());
    }
}
