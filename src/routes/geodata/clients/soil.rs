use super::{Fetch, Provider, UpstreamError, get_json};
use crate::routes::geodata::models::Coordinate;
use crate::routes::geodata::soil::{SOIL_DEPTH_BAND, SOIL_PROPERTIES, SoilLayer};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PropertiesResponse {
    properties: SoilProperties,
}

#[derive(Debug, Deserialize)]
struct SoilProperties {
    layers: Vec<SoilLayer>,
}

/// Depth-banded soil property query (ISRIC SoilGrids v2 shape). Returns the
/// raw layers; flattening is left to [`crate::routes::geodata::soil`].
#[derive(Clone)]
pub struct SoilClient {
    http: reqwest::Client,
    url: String,
}

impl SoilClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    fn query(coordinate: Coordinate) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("lon", coordinate.longitude.to_string()),
            ("lat", coordinate.latitude.to_string()),
            ("depth", SOIL_DEPTH_BAND.to_string()),
            ("value", "mean".to_string()),
        ];
        query.extend(SOIL_PROPERTIES.iter().map(|p| ("property", p.to_string())));
        query
    }
}

#[async_trait]
impl Fetch for SoilClient {
    type Output = Vec<SoilLayer>;

    fn provider(&self) -> Provider {
        Provider::Soil
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<Vec<SoilLayer>, UpstreamError> {
        let response: PropertiesResponse =
            get_json(&self.http, self.provider(), &self.url, &Self::query(coordinate)).await?;
        Ok(response.properties.layers)
    }
}
