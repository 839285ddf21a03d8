//! Adapters for the upstream data providers.
//!
//! Every provider sits behind [`Fetch`], so the aggregator can be driven by
//! real HTTP clients or by in-memory fakes in tests.

pub mod elevation;
pub mod soil;
pub mod weather;

pub use elevation::ElevationClient;
pub use soil::SoilClient;
pub use weather::WeatherClient;

use super::models::Coordinate;
use crate::config::Config;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Provider {
    Elevation,
    Weather,
    Soil,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{provider} provider failed: {cause}")]
pub struct UpstreamError {
    pub provider: Provider,
    pub cause: String,
}

impl UpstreamError {
    pub fn new(provider: Provider, cause: impl Into<String>) -> Self {
        Self {
            provider,
            cause: cause.into(),
        }
    }
}

#[async_trait]
pub trait Fetch: Send + Sync {
    type Output: Send;

    fn provider(&self) -> Provider;

    async fn fetch(&self, coordinate: Coordinate) -> Result<Self::Output, UpstreamError>;
}

/// Shared HTTP client for all providers. No retries are configured.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .user_agent(format!("{}/{}", config.app_name, env!("CARGO_PKG_VERSION")))
        .build()
}

/// Issues a GET and decodes the JSON body, turning every failure into an
/// [`UpstreamError`]. Error bodies are logged, never returned.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    provider: Provider,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, UpstreamError> {
    let response = http.get(url).query(query).send().await.map_err(|e| {
        error!(provider = %provider, url, error = %e, "Upstream request failed");
        UpstreamError::new(provider, format!("request failed: {e}"))
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(
            provider = %provider,
            status = status.as_u16(),
            body = %body,
            "Upstream returned an error status"
        );
        return Err(UpstreamError::new(provider, format!("status {status}")));
    }

    let body = response.bytes().await.map_err(|e| {
        error!(provider = %provider, error = %e, "Failed to read upstream body");
        UpstreamError::new(provider, format!("body read failed: {e}"))
    })?;
    debug!(provider = %provider, bytes = body.len(), "Upstream response received");

    serde_json::from_slice(&body).map_err(|e| {
        error!(
            provider = %provider,
            error = %e,
            body = %String::from_utf8_lossy(&body),
            "Malformed upstream body"
        );
        UpstreamError::new(provider, format!("malformed body: {e}"))
    })
}
