use super::models::HealthCheck;
use super::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use tracing::debug;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(healthz))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (
            status = OK,
            description = "Kubernetes health check",
            body = HealthCheck,
            content_type = "application/json"
        )
    )
)]
pub async fn healthz(State(app_state): State<AppState>) -> (StatusCode, Json<HealthCheck>) {
    debug!(
        endpoint = "healthz",
        app = %app_state.config.app_name,
        deployment = %app_state.config.deployment,
        "Health check"
    );
    (
        StatusCode::OK,
        Json(HealthCheck {
            status: "ok".to_string(),
        }),
    )
}
