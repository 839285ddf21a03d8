//! Fan-out over the three providers and merge into one flat record.

use super::clients::{ElevationClient, Fetch, SoilClient, UpstreamError, WeatherClient};
use super::models::{CombinedEnvironmentalRecord, Coordinate, WeatherSample};
use super::soil::{SoilLayer, SoilProfile};
use crate::config::Config;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// What to do when one provider fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AggregationPolicy {
    /// The first failure aborts the request; no partial record is produced.
    FailFast,
    /// A failed provider contributes nulls and the request carries on.
    Degrade,
}

/// How the three provider calls are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FanOut {
    /// All three in flight at once; under fail-fast the first error drops the rest.
    Concurrent,
    /// Elevation, then weather, then soil.
    Sequential,
}

pub type ElevationSource = Arc<dyn Fetch<Output = Option<f64>>>;
pub type WeatherSource = Arc<dyn Fetch<Output = WeatherSample>>;
pub type SoilSource = Arc<dyn Fetch<Output = Vec<SoilLayer>>>;

#[derive(Clone)]
pub struct GeoDataAggregator {
    elevation: ElevationSource,
    weather: WeatherSource,
    soil: SoilSource,
    policy: AggregationPolicy,
    fan_out: FanOut,
}

impl GeoDataAggregator {
    pub fn new(
        elevation: ElevationSource,
        weather: WeatherSource,
        soil: SoilSource,
        policy: AggregationPolicy,
        fan_out: FanOut,
    ) -> Self {
        Self {
            elevation,
            weather,
            soil,
            policy,
            fan_out,
        }
    }

    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        Self::new(
            Arc::new(ElevationClient::new(http.clone(), &config.elevation_api_url)),
            Arc::new(WeatherClient::new(
                http.clone(),
                &config.weather_api_url,
                config.weather_start,
                config.weather_end,
            )),
            Arc::new(SoilClient::new(http, &config.soil_api_url)),
            config.aggregation_policy,
            config.fan_out,
        )
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    pub async fn aggregate(
        &self,
        coordinate: Coordinate,
    ) -> Result<CombinedEnvironmentalRecord, UpstreamError> {
        let started = Instant::now();
        let (elevation, weather, layers) = match self.policy {
            AggregationPolicy::FailFast => self.fetch_all(coordinate).await?,
            AggregationPolicy::Degrade => self.fetch_all_degraded(coordinate).await,
        };
        debug!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            elapsed_ms = started.elapsed().as_millis() as u64,
            policy = %self.policy,
            fan_out = %self.fan_out,
            "Upstream fan-out finished"
        );

        Ok(CombinedEnvironmentalRecord::new(
            coordinate,
            elevation,
            weather,
            SoilProfile::from_layers(&layers),
        ))
    }

    async fn fetch_all(
        &self,
        coordinate: Coordinate,
    ) -> Result<(Option<f64>, WeatherSample, Vec<SoilLayer>), UpstreamError> {
        match self.fan_out {
            FanOut::Concurrent => tokio::try_join!(
                self.elevation.fetch(coordinate),
                self.weather.fetch(coordinate),
                self.soil.fetch(coordinate),
            ),
            FanOut::Sequential => {
                let elevation = self.elevation.fetch(coordinate).await?;
                let weather = self.weather.fetch(coordinate).await?;
                let layers = self.soil.fetch(coordinate).await?;
                Ok((elevation, weather, layers))
            }
        }
    }

    async fn fetch_all_degraded(
        &self,
        coordinate: Coordinate,
    ) -> (Option<f64>, WeatherSample, Vec<SoilLayer>) {
        let (elevation, weather, layers) = match self.fan_out {
            FanOut::Concurrent => tokio::join!(
                self.elevation.fetch(coordinate),
                self.weather.fetch(coordinate),
                self.soil.fetch(coordinate),
            ),
            FanOut::Sequential => (
                self.elevation.fetch(coordinate).await,
                self.weather.fetch(coordinate).await,
                self.soil.fetch(coordinate).await,
            ),
        };
        (null_filled(elevation), null_filled(weather), null_filled(layers))
    }
}

fn null_filled<T: Default>(result: Result<T, UpstreamError>) -> T {
    result.unwrap_or_else(|e| {
        warn!(provider = %e.provider, error = %e, "Provider failed, filling with nulls");
        T::default()
    })
}
