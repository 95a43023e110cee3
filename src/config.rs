//! Service configuration

use std::env;
use std::path::PathBuf;

/// Application configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Directory holding the serialized model artifacts.
    pub model_dir: PathBuf,
    /// Frontend origin allowed by CORS.
    pub frontend_origin: String,
}

impl AppConfig {
    /// Build the configuration from `SAKHI_*` environment variables, falling
    /// back to development defaults.
    pub fn from_env() -> Self {
        Self {
            listen_addr: env::var("SAKHI_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into()),
            model_dir: env::var("SAKHI_MODEL_DIR")
                .unwrap_or_else(|_| "ml_models".into())
                .into(),
            frontend_origin: env::var("SAKHI_FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
