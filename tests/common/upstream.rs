// Mock upstream providers served by axum on an ephemeral port

use super::fixtures;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct ProviderControl {
    pub fail: AtomicBool,
    pub hits: AtomicUsize,
}

impl ProviderControl {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct UpstreamControl {
    pub elevation: ProviderControl,
    pub weather: ProviderControl,
    pub soil: ProviderControl,
}

impl UpstreamControl {
    pub fn total_hits(&self) -> usize {
        self.elevation.hits() + self.weather.hits() + self.soil.hits()
    }
}

pub struct MockUpstream {
    pub base_url: String,
    pub control: Arc<UpstreamControl>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let control = Arc::new(UpstreamControl::default());
        let app = Router::new()
            .route("/elevation", get(elevation))
            .route("/weather", get(weather))
            .route("/soil", get(soil))
            .with_state(control.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            control,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn failure() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "upstream exploded").into_response()
}

fn number(params: &HashMap<String, String>, key: &str) -> f64 {
    params[key].parse().unwrap()
}

async fn elevation(
    State(control): State<Arc<UpstreamControl>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    control.elevation.hits.fetch_add(1, Ordering::SeqCst);
    if control.elevation.fail.load(Ordering::SeqCst) {
        return failure();
    }
    let (lat, lon) = params["locations"].split_once(',').unwrap();
    Json(fixtures::elevation_body(lat.parse().unwrap(), lon.parse().unwrap())).into_response()
}

async fn weather(
    State(control): State<Arc<UpstreamControl>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    control.weather.hits.fetch_add(1, Ordering::SeqCst);
    if control.weather.fail.load(Ordering::SeqCst) {
        return failure();
    }
    assert_eq!(params["start"], "20200101");
    assert_eq!(params["end"], "20200131");
    Json(fixtures::weather_body(
        number(&params, "latitude"),
        number(&params, "longitude"),
    ))
    .into_response()
}

// Repeated `property` keys collapse in a HashMap, so read the raw pairs
async fn soil(
    State(control): State<Arc<UpstreamControl>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    control.soil.hits.fetch_add(1, Ordering::SeqCst);
    if control.soil.fail.load(Ordering::SeqCst) {
        return failure();
    }
    let properties = pairs.iter().filter(|(k, _)| k == "property").count();
    assert_eq!(properties, 14);
    let params: HashMap<String, String> = pairs.into_iter().collect();
    assert_eq!(params["depth"], "0-5cm");
    Json(fixtures::soil_body(
        number(&params, "lat"),
        number(&params, "lon"),
    ))
    .into_response()
}
