//! QR code maliciousness prediction endpoint.
//!
//! Accepts a multipart image upload. The image is decoded, resized, and
//! normalized entirely in memory; nothing touches the filesystem, so
//! concurrent uploads cannot race on shared state.

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use image::imageops::FilterType;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::QR_IMAGE_SIZE;
use crate::AppState;

/// Route table for this domain.
pub fn router() -> Router<Arc<AppState>> {
    // Registered with the trailing slash the spec mandates; axum's `nest`
    // would serve `/qr` but not `/qr/`, so this router is merged at the top
    // level instead of nested.
    Router::new().route("/qr/", post(predict))
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct QrResponse {
    /// Name of the uploaded file
    pub filename: String,
    /// "Malicious" or "Benign"
    pub prediction: String,
    /// Probability of the predicted label
    pub confidence: f64,
}

/// Classify an uploaded QR code image.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<QrResponse>, ApiError> {
    let model = state.qr.as_ref().ok_or(ApiError::ModelUnavailable("qr"))?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart upload: {e}")))?
        .ok_or_else(|| ApiError::Validation("missing file upload".into()))?;

    let content_type = field.content_type().unwrap_or_default().to_string();
    if !content_type.starts_with("image/") {
        return Err(ApiError::Validation("file must be an image".into()));
    }

    let filename = field.file_name().unwrap_or("upload").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::Validation(format!("failed to read upload: {e}")))?;

    let pixels = decode_pixels(&bytes)?;
    let prob_malicious = model.classify(&pixels)?;

    let (prediction, confidence) = if prob_malicious > 0.5 {
        ("Malicious", prob_malicious)
    } else {
        ("Benign", 1.0 - prob_malicious)
    };

    Ok(Json(QrResponse {
        filename,
        prediction: prediction.into(),
        confidence,
    }))
}

/// Decode an uploaded image into the model's flattened RGB input, resized to
/// the training grid with pixel values scaled to [0, 1].
fn decode_pixels(bytes: &[u8]) -> Result<Array1<f64>, ApiError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ApiError::Validation(format!("could not decode image: {e}")))?;
    let img = img
        .resize_exact(QR_IMAGE_SIZE, QR_IMAGE_SIZE, FilterType::Nearest)
        .to_rgb8();
    Ok(Array1::from_iter(
        img.pixels().flat_map(|p| p.0).map(|v| v as f64 / 255.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QR_INPUT_DIM;
    use image::{ImageOutputFormat, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_decode_pixels_shape_and_range() {
        let mut buf = Cursor::new(Vec::new());
        RgbImage::from_pixel(8, 8, image::Rgb([255, 0, 128]))
            .write_to(&mut buf, ImageOutputFormat::Png)
            .unwrap();

        let pixels = decode_pixels(buf.get_ref()).unwrap();
        assert_eq!(pixels.len(), QR_INPUT_DIM);
        assert!(pixels.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(pixels[0], 1.0);
        assert_eq!(pixels[1], 0.0);
    }

    #[test]
    fn test_decode_pixels_rejects_garbage() {
        assert!(decode_pixels(b"not an image").is_err());
    }
}
