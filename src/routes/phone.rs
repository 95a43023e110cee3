//! Phone spam prediction endpoint

use axum::routing::post;
use axum::{extract::State, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::features::{sanitize_digits, PhoneFeatures};
use crate::AppState;

/// Route table for this domain.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/predict", post(predict))
}

/// Prediction request
#[derive(Debug, Deserialize)]
pub struct PhoneRequest {
    /// Phone number, formatting characters allowed
    pub phone_number: String,
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct PhoneResponse {
    /// Echo of the original, non-normalized input
    pub phone_number: String,
    /// Predicted label
    pub result: String,
    /// Predicted class probability, when the model exposes probabilities
    pub confidence: Option<f64>,
}

/// Classify a phone number.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PhoneRequest>,
) -> Result<Json<PhoneResponse>, ApiError> {
    let model = state
        .phone
        .as_ref()
        .ok_or(ApiError::ModelUnavailable("phone"))?;

    let digits = sanitize_digits(&req.phone_number);
    if digits.is_empty() {
        return Err(ApiError::Validation("invalid phone number input".into()));
    }

    let features = PhoneFeatures::from_digits(&digits);
    let (result, confidence) = model.classify(&features)?;

    Ok(Json(PhoneResponse {
        phone_number: req.phone_number,
        result,
        confidence,
    }))
}
