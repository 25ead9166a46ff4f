//! Error types for fetching, extraction and the pipeline as a whole.
//!
//! Every failure carries the article URL so the one-line diagnostic printed
//! by `main` is enough to tell what went wrong and where.

use thiserror::Error;

/// Failure of the single HTTP request made per run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// DNS, connect, TLS or body read failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// The three ways an extraction can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkError,
    ParseError,
    NotFound,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NetworkError => "NetworkError",
            FailureKind::ParseError => "ParseError",
            FailureKind::NotFound => "NotFound",
        }
    }
}

/// A failed extraction, with enough context to diagnose it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("no article text found at {url}")]
    NotFound { url: String },
}

impl ExtractionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ExtractionError::Network { .. } => FailureKind::NetworkError,
            ExtractionError::Parse { .. } => FailureKind::ParseError,
            ExtractionError::NotFound { .. } => FailureKind::NotFound,
        }
    }
}

/// Anything that stops a pipeline run before a report is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The scorer failed or returned an unusable score. Reported like a
    /// parse failure: the article text could not be scored.
    #[error("failed to score {url}: {reason}")]
    Scoring { url: String, reason: String },
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PipelineError::Extraction(e) => e.kind(),
            PipelineError::Scoring { .. } => FailureKind::ParseError,
        }
    }
}
