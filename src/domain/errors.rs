use chrono::NaiveDate;
use thiserror::Error;

/// Failures of the picture fetch. Any of these aborts a refresh cycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("picture service request failed: {0}")]
    Upstream(String),
    #[error("unexpected picture service payload: {0}")]
    Validation(String),
    #[error("no picture found on or before {requested}")]
    NotFound { requested: NaiveDate },
}

/// Failures of the text-generation API. Never surfaced past the fortune
/// service, which turns them into fallback text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("text generation quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("text generation request failed: {0}")]
    Upstream(String),
}
