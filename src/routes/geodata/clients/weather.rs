use super::{Fetch, Provider, UpstreamError, get_json};
use crate::config::WEATHER_DATE_FORMAT;
use crate::routes::geodata::models::{Coordinate, WeatherSample};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

pub const TEMPERATURE: &str = "T2M";
pub const RELATIVE_HUMIDITY: &str = "RH2M";
pub const PRECIPITATION: &str = "PRECTOTCORR";

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    // Series keyed by YYYYMMDD, so map order is day order
    parameter: HashMap<String, BTreeMap<String, Option<f64>>>,
}

/// Daily point time-series (NASA POWER API shape) over a fixed window.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    url: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl WeatherClient {
    pub fn new(
        http: reqwest::Client,
        url: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            http,
            url: url.into(),
            start,
            end,
        }
    }

    fn query(&self, coordinate: Coordinate) -> Vec<(&'static str, String)> {
        vec![
            (
                "parameters",
                [TEMPERATURE, RELATIVE_HUMIDITY, PRECIPITATION].join(","),
            ),
            ("community", "RE".to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("latitude", coordinate.latitude.to_string()),
            ("start", self.start.format(WEATHER_DATE_FORMAT).to_string()),
            ("end", self.end.format(WEATHER_DATE_FORMAT).to_string()),
            ("format", "JSON".to_string()),
        ]
    }
}

#[async_trait]
impl Fetch for WeatherClient {
    type Output = WeatherSample;

    fn provider(&self) -> Provider {
        Provider::Weather
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<WeatherSample, UpstreamError> {
        let response: PowerResponse =
            get_json(&self.http, self.provider(), &self.url, &self.query(coordinate)).await?;
        Ok(first_day_sample(&response.properties.parameter))
    }
}

/// Takes the first day of each series as the sample.
fn first_day_sample(series: &HashMap<String, BTreeMap<String, Option<f64>>>) -> WeatherSample {
    let first_day = |name: &str| {
        series
            .get(name)
            .and_then(|days| days.values().next().copied().flatten())
    };
    WeatherSample {
        temperature: first_day(TEMPERATURE),
        humidity: first_day(RELATIVE_HUMIDITY),
        rainfall: first_day(PRECIPITATION),
    }
}
