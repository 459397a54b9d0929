use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::application::routes::app_router;
use crate::application::services::sessions::session_cleanup_task;
use crate::application::state::{AppState, AppStateConfig, local_today};
use crate::infrastructure::apod;

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub nasa_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub apod_url: String,
    pub chat_url: String,
    pub chat_model: String,
    pub insecure_cookies: bool,
    pub session_ttl: Duration,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    url::Url::parse(&config.apod_url).context("invalid APOD_FORTUNE_APOD_URL")?;
    url::Url::parse(&config.chat_url).context("invalid APOD_FORTUNE_CHAT_URL")?;

    let state = AppState::from_config(AppStateConfig {
        nasa_api_key: config.nasa_api_key,
        openai_api_key: config.openai_api_key,
        apod_url: config.apod_url,
        apod_timeout: apod::DEFAULT_TIMEOUT,
        chat_url: config.chat_url,
        chat_model: config.chat_model,
        insecure_cookies: config.insecure_cookies,
        today: local_today,
    });

    if !state.missing_secrets.is_empty() {
        warn!(
            missing = ?state.missing_secrets,
            "required secrets are not configured; serving setup instructions only"
        );
    }

    // Spawn background session eviction task (hourly)
    tokio::spawn(session_cleanup_task(
        Arc::clone(&state.sessions),
        config.session_ttl,
        SESSION_CLEANUP_INTERVAL,
    ));

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(address = %config.bind_address, "starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
