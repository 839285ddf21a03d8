use super::soil::SoilProfile;
use crate::routes::prediction::models::PredictionResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("lat and lon are required")]
    Missing,
    #[error("lat must be within [-90, 90] and lon within [-180, 180]")]
    OutOfRange,
}

/// Query string of `/fetch-data`. Both fields are kept as raw text so that a
/// missing or malformed value is reported with our own error body.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FetchDataParams {
    /// Latitude in decimal degrees
    pub lat: Option<String>,
    /// Longitude in decimal degrees
    pub lon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::OutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn from_params(params: &FetchDataParams) -> Result<Self, CoordinateError> {
        let latitude = parse_degrees(params.lat.as_deref())?;
        let longitude = parse_degrees(params.lon.as_deref())?;
        Self::new(latitude, longitude)
    }
}

/// Rust accepts "NaN" and "inf" as floats; neither is a usable coordinate.
fn parse_degrees(raw: Option<&str>) -> Result<f64, CoordinateError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or(CoordinateError::Missing)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherSample {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
}

/// Flat record: coordinate, elevation, weather and the fixed soil key set.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CombinedEnvironmentalRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    #[serde(flatten)]
    pub soil: SoilProfile,
}

impl CombinedEnvironmentalRecord {
    pub fn new(
        coordinate: Coordinate,
        elevation: Option<f64>,
        weather: WeatherSample,
        soil: SoilProfile,
    ) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            elevation,
            temperature: weather.temperature,
            humidity: weather.humidity,
            rainfall: weather.rainfall,
            soil,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResponsePayload {
    pub data: CombinedEnvironmentalRecord,
    pub prediction: PredictionResult,
}
