//! Root and health endpoints

use axum::{response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

/// Health response body
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Server time, RFC 3339
    pub timestamp: String,
}

/// Welcome message
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to Sakhi Fraud Detection API" }))
}

/// Health check
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
