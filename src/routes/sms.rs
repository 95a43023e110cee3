//! SMS spam prediction endpoint

use axum::routing::post;
use axum::{extract::State, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

/// Route table for this domain.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/predict", post(predict))
}

/// Prediction request
#[derive(Debug, Deserialize)]
pub struct SmsRequest {
    /// Message text
    pub text: String,
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct SmsResponse {
    /// Echo of the input
    pub text: String,
    /// "Spam" or "Ham"
    pub prediction: String,
    /// Model confidence as a percentage, rounded to 2 decimals
    pub confidence: f64,
}

/// Classify an SMS message. The heuristic overrides run on every request and
/// can only downgrade a Spam verdict to Ham.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SmsRequest>,
) -> Result<Json<SmsResponse>, ApiError> {
    let model = state.sms.as_ref().ok_or(ApiError::ModelUnavailable("sms"))?;
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation("text cannot be empty".into()));
    }

    let (class, confidence) = model.classify(&req.text)?;

    // Class index 1 is Ham, everything else Spam.
    let mut prediction = if class == 1 { "Ham" } else { "Spam" };

    let otp = state.sms_heuristics.looks_like_otp(&req.text);
    let meeting = state.sms_heuristics.looks_like_meeting(&req.text);
    if otp || meeting {
        prediction = "Ham";
    }

    Ok(Json(SmsResponse {
        text: req.text,
        prediction: prediction.into(),
        confidence: (confidence * 10000.0).round() / 100.0,
    }))
}
