use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::application::services::{FortuneService, SessionStore};
use crate::infrastructure::ai::ChatClient;
use crate::infrastructure::apod::ApodClient;

pub const NASA_API_KEY: &str = "NASA_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Configuration for external services, everything that varies between
/// production and test environments.
pub struct AppStateConfig {
    pub nasa_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub apod_url: String,
    pub apod_timeout: Duration,
    pub chat_url: String,
    pub chat_model: String,
    pub insecure_cookies: bool,
    pub today: fn() -> NaiveDate,
}

#[derive(Clone)]
pub struct AppState {
    /// `None` when a required secret is missing; see `missing_secrets`.
    pub fortune_service: Option<FortuneService>,
    pub missing_secrets: Vec<&'static str>,
    pub sessions: Arc<SessionStore>,
    pub insecure_cookies: bool,
    pub today: fn() -> NaiveDate,
}

/// The local calendar date, used as the default "today".
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn present(secret: Option<String>) -> Option<String> {
    secret.filter(|s| !s.trim().is_empty())
}

impl AppState {
    /// Build the application state. Upstream clients are only created when
    /// both secrets are present.
    pub fn from_config(config: AppStateConfig) -> Self {
        let nasa_api_key = present(config.nasa_api_key);
        let openai_api_key = present(config.openai_api_key);

        let mut missing_secrets = Vec::new();
        if nasa_api_key.is_none() {
            missing_secrets.push(NASA_API_KEY);
        }
        if openai_api_key.is_none() {
            missing_secrets.push(OPENAI_API_KEY);
        }

        let fortune_service = match (nasa_api_key, openai_api_key) {
            (Some(nasa_api_key), Some(openai_api_key)) => {
                let http_client = reqwest::Client::new();
                let pictures =
                    ApodClient::new(http_client.clone(), config.apod_url, nasa_api_key)
                        .with_timeout(config.apod_timeout);
                let generator = ChatClient::new(
                    http_client,
                    config.chat_url,
                    openai_api_key,
                    config.chat_model,
                );
                Some(FortuneService::new(Arc::new(pictures), Arc::new(generator)))
            }
            _ => None,
        };

        Self {
            fortune_service,
            missing_secrets,
            sessions: Arc::new(SessionStore::new()),
            insecure_cookies: config.insecure_cookies,
            today: config.today,
        }
    }
}
