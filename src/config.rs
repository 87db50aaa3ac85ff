// src/config.rs
//
// Runtime configuration
//
// Loaded from environment variables with defaults; CLI flags override the
// loaded values in main.rs.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_INDEX_LIMIT: u32 = 1000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the creature API, without trailing slash
    pub api_base_url: String,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,

    /// Directory holding the local storage database.
    /// `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Number of entries requested for the browse index
    pub index_limit: u32,

    /// Keep collections in memory only
    pub ephemeral: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: None,
            index_limit: DEFAULT_INDEX_LIMIT,
            ephemeral: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Optional variables:
    /// - `POKEHUB_API_URL` -- API base URL (default `https://pokeapi.co/api/v2`)
    /// - `POKEHUB_TIMEOUT_SECS` -- request timeout in seconds (default 15)
    /// - `POKEHUB_DATA_DIR` -- local storage directory (default: platform data dir)
    /// - `POKEHUB_INDEX_LIMIT` -- browse index size (default 1000)
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("POKEHUB_API_URL") {
            config.api_base_url = normalize_base_url(&url)?;
        }

        if let Some(raw) = lookup("POKEHUB_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("invalid POKEHUB_TIMEOUT_SECS: {}", e)))?;
            if secs == 0 {
                return Err(AppError::Config(
                    "POKEHUB_TIMEOUT_SECS must be at least 1".to_string(),
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = lookup("POKEHUB_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(raw) = lookup("POKEHUB_INDEX_LIMIT") {
            let limit: u32 = raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("invalid POKEHUB_INDEX_LIMIT: {}", e)))?;
            config.index_limit = limit.max(1);
        }

        Ok(config)
    }

    /// Override the API base URL (CLI flag)
    pub fn with_api_url(mut self, url: &str) -> AppResult<Self> {
        self.api_base_url = normalize_base_url(url)?;
        Ok(self)
    }
}

fn normalize_base_url(url: &str) -> AppResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "API URL must start with http:// or https://, got '{}'",
            url
        )));
    }
    Ok(trimmed.to_string())
}
