//! URL maliciousness prediction endpoint

use axum::routing::post;
use axum::{extract::State, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::features::{normalize_url, UrlFeatures};
use crate::heuristics::whitelisted;
use crate::AppState;

/// Route table for this domain.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/predict", post(predict))
}

/// Prediction request
#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    /// URL to classify
    pub url: String,
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponse {
    /// Echo of the original input
    pub url: String,
    /// "Safe" or "Malicious"
    pub result: String,
    /// Malicious-class probability (1.0 for whitelist hits), rounded to 4 decimals
    pub confidence: f64,
}

/// Classify a URL. A whitelist hit bypasses the model entirely.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UrlRequest>,
) -> Result<Json<UrlResponse>, ApiError> {
    let model = state.url.as_ref().ok_or(ApiError::ModelUnavailable("url"))?;
    if req.url.trim().is_empty() {
        return Err(ApiError::Validation("url cannot be empty".into()));
    }

    let normalized = normalize_url(&req.url);
    if whitelisted(&normalized).is_some() {
        return Ok(Json(UrlResponse {
            url: req.url,
            result: "Safe".into(),
            confidence: 1.0,
        }));
    }

    let prob_malicious = model.malicious_probability(&UrlFeatures::from_url(&req.url))?;
    let result = if prob_malicious >= 0.5 { "Malicious" } else { "Safe" };

    Ok(Json(UrlResponse {
        url: req.url,
        result: result.into(),
        confidence: (prob_malicious * 10000.0).round() / 10000.0,
    }))
}
