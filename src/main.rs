//! Sakhi Fraud Detection API server entry point.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use sakhi::{build_router, config::AppConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        model_dir = %config.model_dir.display(),
        "starting Sakhi Fraud Detection API"
    );

    let state = AppState::load(&config.model_dir);
    tracing::info!(loaded = state.loaded_count(), "predictors initialized");

    let origin: HeaderValue = config
        .frontend_origin
        .parse()
        .with_context(|| format!("invalid frontend origin {:?}", config.frontend_origin))?;
    let app = build_router(state, origin);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
