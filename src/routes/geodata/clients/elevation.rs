use super::{Fetch, Provider, UpstreamError, get_json};
use crate::routes::geodata::models::Coordinate;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: Option<f64>,
}

/// Single-point elevation lookup (Open-Elevation API shape).
#[derive(Clone)]
pub struct ElevationClient {
    http: reqwest::Client,
    url: String,
}

impl ElevationClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Fetch for ElevationClient {
    type Output = Option<f64>;

    fn provider(&self) -> Provider {
        Provider::Elevation
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<Option<f64>, UpstreamError> {
        let query = [(
            "locations",
            format!("{},{}", coordinate.latitude, coordinate.longitude),
        )];
        let response: LookupResponse =
            get_json(&self.http, self.provider(), &self.url, &query).await?;
        Ok(first_elevation(response))
    }
}

fn first_elevation(response: LookupResponse) -> Option<f64> {
    response.results.into_iter().next().and_then(|r| r.elevation)
}
