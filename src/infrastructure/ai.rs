use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::errors::GenerationError;
use crate::domain::upstreams::{ChatPrompt, TextGenerator};

pub const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const USER_AGENT: &str = "ApodFortune/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error codes the chat API uses for rate and usage limits.
const QUOTA_ERROR_CODES: [&str; 2] = ["rate_limit_exceeded", "insufficient_quota"];

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, GenerationError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: prompt.max_tokens,
        };

        let response = self
            .client
            .post(&self.url)
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GenerationError::Upstream(format!("chat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unreadable body)".to_string());
            return Err(classify_failure(status, &body));
        }

        let body = response.text().await.map_err(|e| {
            GenerationError::Upstream(format!("Failed to read chat response body: {e}"))
        })?;

        let chat_response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::Upstream(format!("Failed to parse chat response: {e}"))
        })?;

        Ok(chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

/// Map a non-success response to a quota or generic failure.
fn classify_failure(status: StatusCode, body: &str) -> GenerationError {
    let quota_code = serde_json::from_str::<ErrorResponse>(body).is_ok_and(|e| {
        [e.error.code, e.error.kind]
            .iter()
            .flatten()
            .any(|c| QUOTA_ERROR_CODES.contains(&c.as_str()))
    });

    let is_quota = status == StatusCode::TOO_MANY_REQUESTS || quota_code;

    let message = format!("chat API returned status {status}: {body}");
    if is_quota {
        GenerationError::QuotaExceeded(message)
    } else {
        GenerationError::Upstream(message)
    }
}

// --- Chat API types ---

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}
