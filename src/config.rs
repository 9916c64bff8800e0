//! Dashboard configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const BASE_URL_VAR: &str = "DROPOUT_API_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "DROPOUT_API_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "DROPOUT_API_CONNECT_TIMEOUT_SECS";

/// Errors produced while building a [`DashboardConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The base URL is empty or does not use an HTTP scheme.
    #[error("invalid base URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    /// Whole-request timeout. `None` waits until the service answers.
    pub request_secs: Option<u64>,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: None, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Service root without a trailing slash, e.g. `http://localhost:5000`.
    pub base_url: String,
    pub timeouts: ApiTimeouts,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), timeouts: ApiTimeouts::default() }
    }
}

impl DashboardConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `DROPOUT_API_BASE_URL`: default `http://localhost:5000`
    /// - `DROPOUT_API_TIMEOUT_SECS`: no request timeout when absent
    /// - `DROPOUT_API_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is not HTTP(S).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DashboardConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is not HTTP(S).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(lookup(BASE_URL_VAR).as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let timeouts = ApiTimeouts {
            request_secs: parse_u64(lookup(REQUEST_TIMEOUT_VAR)),
            connect_secs: parse_u64(lookup(CONNECT_TIMEOUT_VAR)).unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { base_url, timeouts })
    }

    /// Replace the base URL, e.g. with a command-line override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `raw` is not HTTP(S).
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(raw)?;
        Ok(self)
    }
}

fn parse_u64(raw: Option<String>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(rest) if !rest.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_owned())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
