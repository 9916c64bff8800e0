//! HTTP client for the dropout prediction service.
//!
//! Thin wrapper over `/stats`, `/predict` and `/health`. Body decoding
//! lives in pure `parse_*` functions for testability.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Views decide how a failure is
//! shown; this layer only classifies it (transport, status, parse).

use std::time::Duration;

use tracing::debug;

use super::types::{
    ApiError, HealthStatus, PredictionRequest, PredictionResult, ServiceErrorBody, StatisticsSnapshot,
};
use crate::config::DashboardConfig;

pub const STATS_PATH: &str = "/stats";
pub const PREDICT_PATH: &str = "/predict";
pub const HEALTH_PATH: &str = "/health";

// =============================================================================
// TRAIT
// =============================================================================

/// The remote operations the dashboard consumes.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /stats`
    async fn fetch_stats(&self) -> Result<StatisticsSnapshot, ApiError>;

    /// `POST /predict`
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpDashboardApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDashboardApi {
    /// Build a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the TLS backend cannot initialize.
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let mut builder =
            reqwest::Client::builder().connect_timeout(Duration::from_secs(config.timeouts.connect_secs));
        if let Some(secs) = config.timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send `request` and return the body of a 2xx response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), detail = %describe_error_body(&text), "service returned error status");
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_stats(&self) -> Result<StatisticsSnapshot, ApiError> {
        let url = self.url(STATS_PATH);
        debug!(%url, "fetching statistics");
        let text = self.send(self.http.get(&url)).await?;
        parse_stats(&text)
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError> {
        let url = self.url(PREDICT_PATH);
        debug!(%url, ?request, "requesting prediction");
        let text = self.send(self.http.post(&url).json(request)).await?;
        parse_prediction(&text)
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.url(HEALTH_PATH);
        let text = self.send(self.http.get(&url)).await?;
        parse_health(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_stats(json: &str) -> Result<StatisticsSnapshot, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))
}

pub(crate) fn parse_prediction(json: &str) -> Result<PredictionResult, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))
}

pub(crate) fn parse_health(json: &str) -> Result<HealthStatus, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))
}

/// One-line summary of an error body for logs. Falls back to the raw text.
pub(crate) fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(ServiceErrorBody { error: Some(error), message: Some(message) }) => format!("{error}: {message}"),
        Ok(ServiceErrorBody { error: Some(error), message: None }) => error,
        Ok(ServiceErrorBody { error: None, message: Some(message) }) => message,
        _ => body.trim().to_owned(),
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
