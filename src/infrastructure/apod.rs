use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::FetchError;
use crate::domain::fortune::{ApodEntry, DEFAULT_TITLE};
use crate::domain::upstreams::PictureSource;

pub const APOD_URL: &str = "https://api.nasa.gov/planetary/apod";
const USER_AGENT: &str = "ApodFortune/1.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for NASA's Astronomy Picture of the Day API.
#[derive(Clone)]
pub struct ApodClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    timeout: Duration,
}

impl ApodClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PictureSource for ApodClient {
    async fn fetch_day(&self, date: NaiveDate) -> Result<ApodEntry, FetchError> {
        let date_param = date.format("%Y-%m-%d").to_string();
        debug!(date = %date_param, "requesting picture of the day");

        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", USER_AGENT)
            .query(&[("api_key", self.api_key.as_str()), ("date", date_param.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Upstream(format!("APOD request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { requested: date });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unreadable body)".to_string());
            return Err(FetchError::Upstream(format!(
                "APOD returned status {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Upstream(format!("Failed to read APOD response body: {e}")))?;

        let payload: ApodResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Upstream(format!("Failed to parse APOD response: {e}")))?;

        payload.into_entry(date)
    }
}

// --- APOD API types ---

#[derive(Debug, Deserialize)]
struct ApodResponse {
    media_type: Option<String>,
    url: Option<String>,
    title: Option<String>,
    explanation: Option<String>,
}

impl ApodResponse {
    fn into_entry(self, date: NaiveDate) -> Result<ApodEntry, FetchError> {
        match self.media_type.as_deref() {
            Some("image" | "video") => {}
            other => {
                return Err(FetchError::Validation(format!(
                    "media type is not image/video: {}",
                    other.unwrap_or("(missing)")
                )));
            }
        }

        let media_url = self
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| FetchError::Validation("response has no media url".to_string()))?;

        Ok(ApodEntry {
            date,
            media_url,
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            explanation: self.explanation.unwrap_or_default(),
        })
    }
}
