use std::net::SocketAddr;

use clap::Parser;

use crate::infrastructure::{ai, apod};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Serve a daily fortune inspired by NASA's Astronomy Picture of the Day",
    long_about = None
)]
pub struct Cli {
    #[arg(long, env = "APOD_FORTUNE_BIND_ADDRESS", default_value = "127.0.0.1:3000")]
    pub bind_address: SocketAddr,

    #[arg(long, env = "NASA_API_KEY", hide_env_values = true)]
    pub nasa_api_key: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "APOD_FORTUNE_MODEL", default_value = ai::DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "APOD_FORTUNE_APOD_URL", default_value = apod::APOD_URL)]
    pub apod_url: String,

    #[arg(long, env = "APOD_FORTUNE_CHAT_URL", default_value = ai::CHAT_COMPLETIONS_URL)]
    pub chat_url: String,

    #[arg(long, env = "APOD_FORTUNE_INSECURE_COOKIES")]
    pub insecure_cookies: bool,

    /// Hours a session may stay idle before its fortune is discarded
    #[arg(long, env = "APOD_FORTUNE_SESSION_TTL_HOURS", default_value_t = 24)]
    pub session_ttl_hours: u64,
}
