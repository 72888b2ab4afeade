use std::env;
use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::types::DashboardError;

use super::paths::{self, API_URL_ENV};
use super::Config;

impl Config {
    /// Load configuration from config.json in the app directory
    /// Falls back to defaults if the file doesn't exist or can't be parsed
    pub async fn load() -> Self {
        let loaded = match paths::get_config_path() {
            Ok(path) => Self::load_from(&path).await,
            Err(err) => Err(err),
        };

        let mut config = match loaded {
            Ok(config) => config,
            Err(err) => {
                warn!(error = ?err, "Failed to load config.json, using defaults");
                Self::default()
            }
        };

        if let Ok(custom) = env::var(API_URL_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                config.base_url = trimmed.to_string();
            }
        }

        info!(
            base_url = %config.base_url,
            interval_ms = config.update_interval_ms,
            "Loaded configuration"
        );
        config
    }

    /// Read a config file, treating a missing file as "all defaults".
    pub async fn load_from(path: &Path) -> Result<Self, DashboardError> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .await
            .map_err(|err| DashboardError::Config(format!("Failed to read config file: {err}")))?;

        serde_json::from_str(&contents)
            .map_err(|err| DashboardError::Config(format!("Failed to parse config.json: {err}")))
    }
}
