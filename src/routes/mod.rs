pub mod geodata;
pub mod prediction;

use crate::common::state::AppState;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub fn build_router(state: &AppState) -> Router {
    #[derive(OpenApi)]
    #[openapi(info(
        title = "geosoil-api",
        description = "Environmental, soil and NPK prediction data for a coordinate"
    ))]
    struct ApiDoc;

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(crate::common::views::router(state)) // Root routes
        .merge(geodata::views::router(state))
        .split_for_parts();

    // The browser client calls the endpoint under /api
    let api_alias = Router::new()
        .route("/api/fetch-data", get(geodata::views::fetch_data))
        .with_state(state.clone());

    router
        .merge(api_alias)
        .merge(Scalar::with_url("/api/docs", api))
        .layer(CorsLayer::permissive())
}
