use std::time::Duration;

use anyhow::Result;
use apod_fortune::application::{ServerConfig, serve};
use apod_fortune::presentation::cli::Cli;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    if cli.insecure_cookies {
        tracing::warn!("insecure cookies enabled for local development - do not use in production");
    }

    let config = ServerConfig {
        bind_address: cli.bind_address,
        nasa_api_key: cli.nasa_api_key,
        openai_api_key: cli.openai_api_key,
        apod_url: cli.apod_url,
        chat_url: cli.chat_url,
        chat_model: cli.model,
        insecure_cookies: cli.insecure_cookies,
        session_ttl: Duration::from_secs(cli.session_ttl_hours.saturating_mul(3600)),
    };

    serve(config).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
