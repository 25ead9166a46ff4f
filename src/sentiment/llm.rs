//! LLM-backed sentiment engine with exponential backoff retry logic.
//!
//! Sends the article text to an OpenAI-compatible API through `awful_aj`
//! and expects a JSON object with `positive`, `negative`, `neutral` and
//! `compound` fields back. The default `sentiment_scorer` chat template that
//! asks for that reply ships in `templates/sentiment_scorer.yaml`.
//!
//! # Architecture
//!
//! - [`AskAsync`]: Core trait defining async LLM interaction
//! - [`AskFnWrapper`]: Wraps the `awful_aj` library's `ask` function
//! - [`RetryAsk`]: Decorator that adds retry logic to any `AskAsync` implementation
//! - [`LlmScorer`]: [`SentimentScorer`] that parses the model's reply
//!
//! # Retry Strategy
//!
//! Retries cover the scoring API only; the article fetch is never retried.
//!
//! - Maximum 3 retry attempts
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to each delay

use crate::models::SentimentScore;
use crate::sentiment::SentimentScorer;
use crate::utils::truncate_for_log;
use awful_aj::api::ask;
use awful_aj::{config, config_dir, config::AwfulJadeConfig, template, template::ChatTemplate};
use rand::{Rng, rng};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

const MAX_RETRIES: usize = 3;

/// Trait for async LLM interaction.
pub trait AskAsync {
    type Response;

    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>>;
}

/// Wrapper that adds exponential backoff retry logic to any [`AskAsync`] implementation.
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryAsk<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryAsk<T>
where
    T: AskAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    fn delay_for(&self, attempt: usize) -> StdDuration {
        let shift = u32::try_from(attempt.saturating_sub(1)).unwrap_or(u32::MAX).min(16);
        self.base_delay
            .saturating_mul(1 << shift)
            .min(self.max_delay)
    }
}

impl<T> fmt::Debug for RetryAsk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryAsk")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> AskAsync for RetryAsk<T>
where
    T: AskAsync,
{
    type Response = T::Response;

    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.ask(text).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis(),
                            error = %e,
                            "ask() exhausted retries"
                        );
                        return Err(e);
                    }

                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = self.delay_for(attempt) + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_total = total_dt.as_millis(),
                        ?delay,
                        error = %e,
                        "ask() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Wrapper around `awful_aj::api::ask` that implements [`AskAsync`].
#[derive(Debug)]
pub struct AskFnWrapper<'a> {
    pub config: &'a AwfulJadeConfig,
    pub template: &'a ChatTemplate,
}

impl AskAsync for AskFnWrapper<'_> {
    type Response = String;

    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>> {
        let t0 = Instant::now();
        let res = ask(self.config, text.to_string(), self.template, None, None).await;
        if let Err(e) = &res {
            warn!(elapsed_ms = t0.elapsed().as_millis(), error = %e, "API call failed");
        }
        res
    }
}

/// [`SentimentScorer`] that asks an LLM for the four scores.
pub struct LlmScorer {
    config: AwfulJadeConfig,
    template: ChatTemplate,
    base_delay: StdDuration,
}

impl fmt::Debug for LlmScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmScorer")
            .field("base_delay", &self.base_delay)
            .finish_non_exhaustive()
    }
}

impl LlmScorer {
    /// Load `config.yaml` and the named template from the `awful_aj`
    /// config directory.
    #[instrument(level = "info")]
    pub async fn load(template_name: &str) -> Result<Self, Box<dyn Error>> {
        let template = template::load_template(template_name).await?;
        let conf_file = config_dir()?.join("config.yaml");
        let config_path = conf_file
            .to_str()
            .ok_or("config path is not valid UTF-8")?;
        let config = config::load_config(config_path)?;
        info!(config_path, template_name, "Loaded LLM scorer configuration");
        Ok(Self {
            config,
            template,
            base_delay: StdDuration::from_secs(1),
        })
    }
}

impl SentimentScorer for LlmScorer {
    fn name(&self) -> &str {
        "llm"
    }

    #[instrument(level = "info", skip_all, fields(bytes = text.len()))]
    async fn score(&self, text: &str) -> Result<SentimentScore, Box<dyn Error>> {
        let client = AskFnWrapper {
            config: &self.config,
            template: &self.template,
        };
        let api = RetryAsk::new(client, MAX_RETRIES, self.base_delay);
        let response = api.ask(text).await?;
        parse_score_response(&response).map_err(|e| {
            warn!(
                error = %e,
                response_preview = %truncate_for_log(&response, 300),
                "Model returned non-conforming JSON"
            );
            e
        })
    }
}

/// Parse the model's reply into a [`SentimentScore`].
///
/// Models often wrap JSON in prose or code fences, so the outermost
/// `{ ... }` span is parsed.
pub fn parse_score_response(response: &str) -> Result<SentimentScore, Box<dyn Error>> {
    let start = response.find('{').ok_or("no JSON object in model response")?;
    let end = response.rfind('}').ok_or("no JSON object in model response")?;
    if end < start {
        return Err("no JSON object in model response".into());
    }
    let score = serde_json::from_str::<SentimentScore>(&response[start..=end])?;
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug)]
    struct Flaky {
        failures_left: Cell<usize>,
        calls: Cell<usize>,
    }

    impl AskAsync for Flaky {
        type Response = String;

        async fn ask(&self, text: &str) -> Result<String, Box<dyn Error>> {
            self.calls.set(self.calls.get() + 1);
            if self.failures_left.get() > 0 {
                self.failures_left.set(self.failures_left.get() - 1);
                return Err("503 Service Unavailable".into());
            }
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn test_parse_plain_json() {
        let s = parse_score_response(
            r#"{"positive":0.4,"negative":0.1,"neutral":0.5,"compound":0.62}"#,
        )
        .unwrap();
        assert_eq!(s.compound, 0.62);
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "Here you go:\n```json\n{\"positive\": 0.0, \"negative\": 0.3, \"neutral\": 0.7, \"compound\": -0.4}\n```";
        let s = parse_score_response(reply).unwrap();
        assert_eq!(s.negative, 0.3);
    }

    #[test]
    fn test_parse_rejects_missing_fields_and_prose() {
        assert!(parse_score_response(r#"{"positive":0.4,"negative":0.1}"#).is_err());
        assert!(parse_score_response("I think it is positive.").is_err());
        assert!(parse_score_response("} backwards {").is_err());
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let flaky = Flaky {
            failures_left: Cell::new(0),
            calls: Cell::new(0),
        };
        let retry = RetryAsk::new(flaky, 10, StdDuration::from_secs(1));
        assert_eq!(retry.delay_for(1), StdDuration::from_secs(1));
        assert_eq!(retry.delay_for(2), StdDuration::from_secs(2));
        assert_eq!(retry.delay_for(3), StdDuration::from_secs(4));
        assert_eq!(retry.delay_for(10), StdDuration::from_secs(30));
    }

    #[tokio::test]
    async fn test_retry_recovers_after_failures() {
        let flaky = Flaky {
            failures_left: Cell::new(2),
            calls: Cell::new(0),
        };
        let retry = RetryAsk::new(flaky, 3, StdDuration::from_millis(1));
        assert_eq!(retry.ask("ok").await.unwrap(), "OK");
        assert_eq!(retry.inner.calls.get(), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up() {
        let flaky = Flaky {
            failures_left: Cell::new(10),
            calls: Cell::new(0),
        };
        let retry = RetryAsk::new(flaky, 1, StdDuration::from_millis(1));
        assert!(retry.ask("x").await.is_err());
        assert_eq!(retry.inner.calls.get(), 2);
    }

    #[test]
    fn test_shipped_template_asks_for_the_parsed_fields() {
        let template = include_str!("../../templates/sentiment_scorer.yaml");
        assert!(template.contains("system_prompt:"));
        for field in ["\"positive\"", "\"negative\"", "\"neutral\"", "\"compound\""] {
            assert!(template.contains(field), "template does not mention {field}");
        }

        let reply = r#"{"positive": 0.1, "negative": 0.6, "neutral": 0.3, "compound": -0.55}"#;
        let score = parse_score_response(reply).unwrap();
        assert!(score.validate().is_ok());
        assert_eq!(score.compound, -0.55);
    }
}
