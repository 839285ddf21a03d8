use super::models::{
    CombinedEnvironmentalRecord, Coordinate, CoordinateError, FetchDataParams, ResponsePayload,
};
use super::soil::{SOIL_DEPTH_BAND, SOIL_PROPERTIES, SOIL_PROPERTY_SET_VERSION};
use crate::common::error::{ApiError, ErrorBody};
use crate::common::state::AppState;
use crate::routes::prediction::models::{PredictionInputs, PredictionResult};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Serialize;
use tracing::{Instrument, error, info, info_span, warn};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct SoilPropertySet {
    pub version: u32,
    pub depth_band: String,
    pub properties: Vec<String>,
}

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(fetch_data))
        .routes(routes!(get_soil_properties))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/fetch-data",
    params(FetchDataParams),
    responses(
        (status = 200, description = "Merged environmental record and NPK prediction", body = ResponsePayload),
        (status = 400, description = "lat or lon missing or not a number", body = ErrorBody),
        (status = 500, description = "A data provider failed or the prediction component could not be started", body = ErrorBody)
    ),
    summary = "Environmental, soil and NPK data for a coordinate",
    description = "Queries the elevation, weather and soil providers for the coordinate, flattens the result and runs the NPK prediction on it. A prediction that produced no usable output is reported inside the payload, not as an HTTP error."
)]
pub async fn fetch_data(
    State(state): State<AppState>,
    params: Result<Query<FetchDataParams>, QueryRejection>,
) -> Result<Json<ResponsePayload>, ApiError> {
    let request_id = Uuid::new_v4();
    let params = params.map(|Query(p)| p).unwrap_or_else(|rejection| {
        warn!(%request_id, error = %rejection, "Unreadable query string");
        FetchDataParams::default()
    });

    let span = info_span!("fetch_data", %request_id);
    handle_fetch_data(state, params).instrument(span).await.map(Json)
}

async fn handle_fetch_data(
    state: AppState,
    params: FetchDataParams,
) -> Result<ResponsePayload, ApiError> {
    let coordinate = Coordinate::from_params(&params).inspect_err(|e: &CoordinateError| {
        warn!(lat = ?params.lat, lon = ?params.lon, error = %e, "Rejected coordinate");
    })?;

    let record = state
        .aggregator
        .aggregate(coordinate)
        .await
        .inspect_err(|e| {
            error!(
                provider = %e.provider,
                cause = %e.cause,
                policy = %state.aggregator.policy(),
                "Aggregation failed"
            );
        })?;

    let prediction = state
        .predictor
        .predict(PredictionInputs::from(&record))
        .await
        .inspect_err(|e| error!(error = %e, "Prediction component unavailable"))?;

    info!(
        latitude = coordinate.latitude,
        longitude = coordinate.longitude,
        degraded_prediction = matches!(prediction, PredictionResult::Failed { .. }),
        "Request served"
    );
    Ok(assemble(record, prediction))
}

/// Combines the merged record and the prediction into the response body.
pub fn assemble(
    data: CombinedEnvironmentalRecord,
    prediction: PredictionResult,
) -> ResponsePayload {
    ResponsePayload { data, prediction }
}

#[utoipa::path(
    get,
    path = "/soil-properties",
    responses(
        (status = 200, description = "Soil property keys present in every record", body = SoilPropertySet)
    ),
    summary = "Soil property key set",
    description = "Lists the soil property keys that every `/fetch-data` record carries, with the depth band and the revision of the key set."
)]
pub async fn get_soil_properties() -> Json<SoilPropertySet> {
    Json(SoilPropertySet {
        version: SOIL_PROPERTY_SET_VERSION,
        depth_band: SOIL_DEPTH_BAND.to_string(),
        properties: SOIL_PROPERTIES.iter().map(|p| p.to_string()).collect(),
    })
}
