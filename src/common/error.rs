use crate::routes::geodata::clients::UpstreamError;
use crate::routes::geodata::models::CoordinateError;
use crate::routes::prediction::invoker::LaunchError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Client-facing error body. Diagnostic detail stays in the logs.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidInput(#[from] CoordinateError),

    #[error(transparent)]
    UpstreamFailure(#[from] UpstreamError),

    #[error(transparent)]
    PredictionLaunchFailure(#[from] LaunchError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamFailure(_) | ApiError::PredictionLaunchFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match &self {
            ApiError::InvalidInput(e) => e.to_string(),
            _ => INTERNAL_SERVER_ERROR.to_string(),
        };
        (self.status(), Json(ErrorBody { error })).into_response()
    }
}
