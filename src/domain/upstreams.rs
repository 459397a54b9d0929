use async_trait::async_trait;
use chrono::NaiveDate;

use super::errors::{FetchError, GenerationError};
use super::fortune::ApodEntry;

/// Source of daily astronomy pictures.
#[async_trait]
pub trait PictureSource: Send + Sync {
    /// Fetch the entry for exactly `date`. A missing day is
    /// `FetchError::NotFound`; walking back is the caller's job.
    async fn fetch_day(&self, date: NaiveDate) -> Result<ApodEntry, FetchError>;
}

/// A single system + user prompt exchange with a length cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the raw text of the first completion choice.
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, GenerationError>;
}
