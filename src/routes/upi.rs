//! UPI fraud prediction endpoint

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
pub struct UpiRequest {
    /// UPI ID to classify
    pub upi: String,
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct UpiResponse {
    /// Echo of the input
    pub upi: String,
    /// Predicted class id
    pub prediction: i64,
    /// Full class-probability vector, when the model exposes one
    pub probability: Option<Vec<f64>>,
}

/// Classify a UPI ID.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpiRequest>,
) -> Result<Json<UpiResponse>, ApiError> {
    let model = state.upi.as_ref().ok_or(ApiError::ModelUnavailable("upi"))?;
    if req.upi.trim().is_empty() {
        return Err(ApiError::Validation("upi id cannot be empty".into()));
    }

    let (prediction, probability) = model.classify(&req.upi)?;

    Ok(Json(UpiResponse {
        upi: req.upi,
        prediction,
        probability,
    }))
}
