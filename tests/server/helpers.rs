use apod_fortune::application::routes::app_router;
use apod_fortune::application::state::{AppState, AppStateConfig};
use apod_fortune::infrastructure::apod::DEFAULT_TIMEOUT;
use chrono::NaiveDate;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const APOD_PATH: &str = "/planetary/apod";
pub const CHAT_PATH: &str = "/v1/chat/completions";
pub const NASA_KEY: &str = "test-nasa-key";
pub const OPENAI_KEY: &str = "test-openai-key";

pub const TRANSLATOR_PERSONA: &str = "professional Japanese translator";
pub const FORTUNE_PERSONA: &str = "poetic spiritual fortune teller";

pub struct TestApp {
    pub address: String,
    pub mock_server: MockServer,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Some(NASA_KEY), Some(OPENAI_KEY), test_today).await
}

pub async fn spawn_app_with(
    nasa_api_key: Option<&str>,
    openai_api_key: Option<&str>,
    today: fn() -> NaiveDate,
) -> TestApp {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server, nasa_api_key, openai_api_key, today);
    spawn_app_from(mock_server, config).await
}

/// State configuration pointing both upstreams at `mock_server`.
pub fn test_config(
    mock_server: &MockServer,
    nasa_api_key: Option<&str>,
    openai_api_key: Option<&str>,
    today: fn() -> NaiveDate,
) -> AppStateConfig {
    AppStateConfig {
        nasa_api_key: nasa_api_key.map(str::to_string),
        openai_api_key: openai_api_key.map(str::to_string),
        apod_url: format!("{}{APOD_PATH}", mock_server.uri()),
        apod_timeout: DEFAULT_TIMEOUT,
        chat_url: format!("{}{CHAT_PATH}", mock_server.uri()),
        chat_model: "test-model".to_string(),
        insecure_cookies: true,
        today,
    }
}

pub async fn spawn_app_from(mock_server: MockServer, config: AppStateConfig) -> TestApp {
    let app = app_router(AppState::from_config(config));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");

    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{}", local_addr);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        mock_server,
        server_handle,
    }
}

/// A client that keeps the session cookie and follows redirects.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

/// A client that keeps the session cookie but reports redirects as-is.
pub fn browser_without_redirects() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

pub fn apod_body(media_type: &str, url: &str, title: &str, explanation: &str) -> serde_json::Value {
    json!({
        "date": "2024-03-01",
        "explanation": explanation,
        "media_type": media_type,
        "service_version": "v1",
        "title": title,
        "url": url
    })
}

pub fn chat_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

pub async fn mock_apod_day(app: &TestApp, date: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(APOD_PATH))
        .and(query_param("api_key", NASA_KEY))
        .and(query_param("date", date))
        .respond_with(response)
        .mount(&app.mock_server)
        .await;
}

pub async fn mock_orion(app: &TestApp, date: &str) {
    mock_apod_day(
        app,
        date,
        ResponseTemplate::new(200).set_body_json(apod_body(
            "image",
            "https://apod.nasa.gov/apod/image/2403/orion.jpg",
            "The Great Nebula in Orion",
            "A bright nebula glows in Orion.",
        )),
    )
    .await;
}

pub async fn mock_chat(app: &TestApp, persona: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains(persona))
        .respond_with(response)
        .mount(&app.mock_server)
        .await;
}

pub async fn mock_translation(app: &TestApp, content: &str) {
    mock_chat(
        app,
        TRANSLATOR_PERSONA,
        ResponseTemplate::new(200).set_body_json(chat_body(content)),
    )
    .await;
}

pub async fn mock_fortune(app: &TestApp, content: &str) {
    mock_chat(
        app,
        FORTUNE_PERSONA,
        ResponseTemplate::new(200).set_body_json(chat_body(content)),
    )
    .await;
}

/// Asserts that the body contains full HTML page structure
pub fn assert_full_page(body: &str) {
    assert!(
        body.contains("<!DOCTYPE") || body.contains("<html"),
        "Expected full HTML page with DOCTYPE or <html> tag"
    );
}
