//! Sakhi Fraud Detection API
//!
//! ML-powered fraud and spam detection behind HTTP prediction endpoints.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      SAKHI FRAUD DETECTION API                   │
//! │                                                                  │
//! │  ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐         │
//! │  │  UPI   │ │ Phone  │ │   QR   │ │  SMS   │ │  URL   │         │
//! │  │ fraud  │ │  spam  │ │ image  │ │  spam  │ │ threat │         │
//! │  └───┬────┘ └───┬────┘ └───┬────┘ └───┬────┘ └───┬────┘         │
//! │      │          │          │          │          │              │
//! │  ┌───▼──────────▼──────────▼──────────▼──────────▼────────────┐ │
//! │  │        MODEL ARTIFACTS (loaded once, immutable)            │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! │                                                                  │
//! │  ┌──────────────────┐  ┌────────────────────────────────────┐   │
//! │  │ Feature Extractor│  │ Heuristic Overlay + URL Whitelist  │   │
//! │  │ (phone, url)     │  │ (SMS Spam→Ham only)                │   │
//! │  └──────────────────┘  └────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod features;
pub mod heuristics;
pub mod models;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::heuristics::SmsHeuristics;
use crate::models::{ModelError, PhoneModel, QrModel, SmsModel, UpiModel, UrlModel};

pub use crate::error::ApiError;

/// Shared application state: every loaded predictor plus the compiled SMS
/// heuristics. Built once at startup and read-only afterwards.
///
/// A predictor whose artifact failed to load is `None` and stays unavailable
/// until the process restarts; its endpoint answers 503.
pub struct AppState {
    /// UPI fraud model
    pub upi: Option<UpiModel>,
    /// Phone spam pipeline
    pub phone: Option<PhoneModel>,
    /// QR image model
    pub qr: Option<QrModel>,
    /// SMS spam model
    pub sms: Option<SmsModel>,
    /// URL maliciousness model
    pub url: Option<UrlModel>,
    /// SMS override predicates
    pub sms_heuristics: SmsHeuristics,
}

impl AppState {
    /// Load every model artifact from `model_dir`. Failures degrade the
    /// affected predictor instead of aborting startup.
    pub fn load(model_dir: &Path) -> Self {
        Self {
            upi: try_load("upi", UpiModel::load(&model_dir.join("upi_model.json"))),
            phone: try_load(
                "phone",
                PhoneModel::load(&model_dir.join("phone_spam_pipeline.json")),
            ),
            qr: try_load("qr", QrModel::load(&model_dir.join("qr_model.json"))),
            sms: try_load("sms", SmsModel::load(&model_dir.join("sms_model.json"))),
            url: try_load("url", UrlModel::load(&model_dir.join("url_model.json"))),
            sms_heuristics: SmsHeuristics::new(),
        }
    }

    /// Number of predictors that loaded successfully.
    pub fn loaded_count(&self) -> usize {
        [
            self.upi.is_some(),
            self.phone.is_some(),
            self.qr.is_some(),
            self.sms.is_some(),
            self.url.is_some(),
        ]
        .iter()
        .filter(|loaded| **loaded)
        .count()
    }
}

fn try_load<M>(name: &'static str, result: Result<M, ModelError>) -> Option<M> {
    match result {
        Ok(model) => {
            tracing::info!(model = name, "model loaded");
            Some(model)
        }
        Err(err) => {
            tracing::error!(model = name, error = %err, "failed to load model, predictor disabled");
            None
        }
    }
}

/// Build the API router. Cross-origin requests are allowed from the single
/// `frontend_origin`, with credentials, any method, and mirrored headers.
pub fn build_router(state: AppState, frontend_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .nest("/upi", routes::upi::router())
        .nest("/phone", routes::phone::router())
        .merge(routes::qr::router())
        .nest("/sms", routes::sms::router())
        .nest("/url", routes::url::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
