use crate::routes::geodata::aggregator::{AggregationPolicy, FanOut};
use chrono::NaiveDate;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Date format used by the weather provider for its `start`/`end` parameters.
pub const WEATHER_DATE_FORMAT: &str = "%Y%m%d";

#[derive(Clone, Debug)]
pub struct Config {
    pub app_name: String,
    pub deployment: String,
    pub bind_address: String,
    pub elevation_api_url: String,
    pub weather_api_url: String,
    pub soil_api_url: String,
    // Fixed historical window, independent of the request date
    pub weather_start: NaiveDate,
    pub weather_end: NaiveDate,
    pub upstream_timeout_secs: u64,
    pub aggregation_policy: AggregationPolicy,
    pub fan_out: FanOut,
    pub prediction_program: String,
    pub prediction_args: Vec<String>,
    pub prediction_workers: usize, // Max concurrent prediction processes
    pub prediction_timeout_secs: u64, // 0 disables the limit
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok(); // Load from .env file if available

        Config {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "geosoil-api".to_string()),
            deployment: env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            elevation_api_url: env::var("ELEVATION_API_URL").unwrap_or_else(|_| {
                "https://api.open-elevation.com/api/v1/lookup".to_string()
            }),
            weather_api_url: env::var("WEATHER_API_URL").unwrap_or_else(|_| {
                "https://power.larc.nasa.gov/api/temporal/daily/point".to_string()
            }),
            soil_api_url: env::var("SOIL_API_URL").unwrap_or_else(|_| {
                "https://rest.isric.org/soilgrids/v2.0/properties/query".to_string()
            }),
            weather_start: date_var("WEATHER_START", default_weather_start()),
            weather_end: date_var("WEATHER_END", default_weather_end()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            aggregation_policy: enum_var("AGGREGATION_POLICY", AggregationPolicy::FailFast),
            fan_out: enum_var("FAN_OUT", FanOut::Concurrent),
            prediction_program: env::var("PREDICTION_PROGRAM")
                .unwrap_or_else(|_| "python".to_string()),
            prediction_args: env::var("PREDICTION_ARGS")
                .unwrap_or_else(|_| "./python/predict.py".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            prediction_workers: env::var("PREDICTION_WORKERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(4),
            prediction_timeout_secs: env::var("PREDICTION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        }
    }

    pub fn for_tests() -> Self {
        Config {
            app_name: "geosoil-api-test".to_string(),
            deployment: "test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            elevation_api_url: "http://127.0.0.1:9/elevation".to_string(),
            weather_api_url: "http://127.0.0.1:9/weather".to_string(),
            soil_api_url: "http://127.0.0.1:9/soil".to_string(),
            weather_start: default_weather_start(),
            weather_end: default_weather_end(),
            upstream_timeout_secs: 5,
            aggregation_policy: AggregationPolicy::FailFast,
            fan_out: FanOut::Concurrent,
            prediction_program: "sh".to_string(),
            prediction_args: vec![],
            prediction_workers: 2,
            prediction_timeout_secs: 10,
        }
    }
}

fn default_weather_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

fn default_weather_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 31).unwrap_or_default()
}

fn date_var(name: &str, default: NaiveDate) -> NaiveDate {
    match env::var(name) {
        Ok(raw) => NaiveDate::parse_from_str(raw.trim(), WEATHER_DATE_FORMAT).unwrap_or_else(|e| {
            warn!(variable = name, value = %raw, error = %e, "Invalid date, using default");
            default
        }),
        Err(_) => default,
    }
}

fn enum_var<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => T::from_str(raw.trim()).unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Unrecognised value, using default");
            default
        }),
        Err(_) => default,
    }
}
