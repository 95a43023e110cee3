//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::models::ModelError;

/// Request-scoped failures. Every variant maps to one HTTP status code and a
/// `{"error": ...}` JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The predictor's artifact failed to load at startup; the predictor stays
    /// unavailable until the process restarts.
    #[error("{0} model not loaded, check server logs")]
    ModelUnavailable(&'static str),
    /// The request input was empty, missing, or malformed.
    #[error("{0}")]
    Validation(String),
    /// Feature extraction or the model call itself failed.
    #[error("prediction failed: {0}")]
    Inference(String),
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Inference(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "inference failure");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
