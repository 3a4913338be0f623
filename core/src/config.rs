//! Client configuration.
//!
//! `ClientConfig::new` covers the common case of a site id and client token
//! with production defaults. `ClientConfig::from_env` reads the same values
//! from `AISEARCH_*` environment variables, loading a `.env` file first.

use std::time::Duration;

use crate::error::AisearchError;

pub const DEFAULT_BASE_URL: &str = "https://api.aisearch.app";
pub const API_VERSION: &str = "v1";
pub const USER_AGENT: &str = "Aisearch SDK v0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings shared by every request of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub site_id: u64,
    pub client_token: String,
    /// Scheme and host without trailing slash, e.g. `https://api.aisearch.app`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound for a whole request including the body read.
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(site_id: u64, client_token: &str) -> Self {
        Self {
            site_id,
            client_token: client_token.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Load configuration from the environment.
    ///
    /// Calls `dotenvy::dotenv().ok()` first so a `.env` file in the working
    /// directory is honoured.
    ///
    /// # Errors
    ///
    /// Returns [`AisearchError::Config`] if `AISEARCH_SITE_ID` or
    /// `AISEARCH_CLIENT_TOKEN` is missing, or any value fails to parse.
    pub fn from_env() -> Result<Self, AisearchError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Keeps the parsing testable with a plain map instead of process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AisearchError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let require = |var: &str| -> Result<String, AisearchError> {
            lookup(var).map_err(|_| AisearchError::Config(format!("{var} is not set")))
        };
        let parse_u64 = |var: &str, raw: &str| -> Result<u64, AisearchError> {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| AisearchError::Config(format!("{var}: {e}")))
        };

        let site_id = parse_u64("AISEARCH_SITE_ID", &require("AISEARCH_SITE_ID")?)?;
        let client_token = require("AISEARCH_CLIENT_TOKEN")?;
        if client_token.trim().is_empty() {
            return Err(AisearchError::Config(
                "AISEARCH_CLIENT_TOKEN is empty".to_string(),
            ));
        }

        let mut config = Self::new(site_id, client_token.trim());
        if let Ok(base_url) = lookup("AISEARCH_BASE_URL") {
            config = config.with_base_url(base_url.trim());
        }
        if let Ok(raw) = lookup("AISEARCH_TIMEOUT_SECS") {
            let secs = parse_u64("AISEARCH_TIMEOUT_SECS", &raw)?;
            config.timeout = Duration::from_secs(secs);
            config.connect_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// `{base_url}/sites/{site_id}/v1`, the prefix of every endpoint.
    pub fn api_root(&self) -> String {
        format!("{}/sites/{}/{API_VERSION}", self.base_url, self.site_id)
    }
}
