//! Upstream API configuration and shared defaults.
//!
//! Settings are read from environment variables so the provider can be
//! pointed at a different backend without a rebuild:
//!
//! - `STOCK_API_URL` — base URL of the quote backend (default
//!   `http://127.0.0.1:5000`).
//! - `STOCK_API_KEY` — optional API key sent as `X-API-Key`.
//! - `STOCK_API_TIMEOUT_SECS` — per-request HTTP timeout (default 10).

use std::env;
use std::time::Duration;

use crate::error::StoreError;
use crate::result::Result;

/// Default base URL of the quote backend.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
/// Default per-request HTTP timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default auto-refresh interval.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Connection settings for the upstream quote API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Optional API key, sent as the `X-API-Key` header when present.
    pub api_key: Option<String>,
    /// Per-request timeout for the HTTP client.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Builds a config for the given base URL with default timeout and no key.
    pub fn new(base_url: &str) -> Self {
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from environment variables, applying defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("STOCK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = env::var("STOCK_API_KEY").ok().filter(|k| !k.is_empty());
        let timeout_secs = match env::var("STOCK_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                StoreError::Config(format!("invalid STOCK_API_TIMEOUT_SECS {:?}: {}", raw, e))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash() {
        let config = ApiConfig::new("http://localhost:5000/");
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.api_key.is_none());
    }
}
