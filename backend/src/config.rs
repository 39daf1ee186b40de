//! Runtime configuration, read from the environment once at startup and
//! passed by reference into the model layer.

use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mode: DeploymentMode,
    /// Bucket name used for uploaded file bytes and for the mock URLs
    /// generated in development mode.
    pub storage_bucket: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mode = match env::var("APP_ENV").as_deref() {
            Ok("production") => DeploymentMode::Production,
            _ => DeploymentMode::Development,
        };
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let storage_bucket = env::var("STORAGE_BUCKET")
            .unwrap_or_else(|_| "content-harvester.appspot.com".to_string());

        Self {
            host,
            port,
            mode,
            storage_bucket,
        }
    }

    pub fn is_production(&self) -> bool {
        self.mode == DeploymentMode::Production
    }
}
