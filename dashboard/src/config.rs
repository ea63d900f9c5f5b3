use anyhow::{Context, Result};
use env_logger::Builder;
use log::{info, LevelFilter};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the YouTube Data API client.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_key: String,
    pub api_base_url: String,
    /// Applied to every request; a hung call fails the submission instead of blocking it.
    pub request_timeout: Duration,
}

impl DashboardConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Reads `YOUTUBE_API_KEY`, `YOUTUBE_API_BASE_URL` and `YOUTUBE_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("YOUTUBE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("YOUTUBE_API_KEY environment variable must be set")?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup("YOUTUBE_API_BASE_URL") {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup("YOUTUBE_API_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("YOUTUBE_API_TIMEOUT_SECS is not a number: {raw}"))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
    info!("Starting Statify...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}
