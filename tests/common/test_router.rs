// Test-specific router builder wired to the mock upstream providers

use super::upstream::MockUpstream;
use axum::Router;
use geosoil_api::common::state::AppState;
use geosoil_api::config::Config;
use geosoil_api::routes::build_router;

/// Config pointing every provider at the mock and running `script` through
/// `sh -c` as the prediction component.
pub fn test_config(upstream: &MockUpstream, script: &str) -> Config {
    let mut config = Config::for_tests();
    config.elevation_api_url = upstream.url("elevation");
    config.weather_api_url = upstream.url("weather");
    config.soil_api_url = upstream.url("soil");
    config.prediction_program = "sh".to_string();
    config.prediction_args = vec!["-c".to_string(), script.to_string(), "predict".to_string()];
    config
}

pub fn build_test_router(config: Config) -> Router {
    let state = AppState::new(config).expect("Failed to build test state");
    build_router(&state)
}
