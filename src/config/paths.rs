use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::types::DashboardError;

use super::Config;

pub(super) const CONFIG_PATH_ENV: &str = "STUDYMATE_CONFIG";
pub(super) const API_URL_ENV: &str = "STUDYMATE_API_URL";

impl Config {
    /// Full URL of an endpoint path relative to the API base.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        match self.api_base.trim_matches('/') {
            "" => format!("{base}/{endpoint}"),
            api_base => format!("{base}/{api_base}/{endpoint}"),
        }
    }
}

/// Get the path to the config.json file
/// An explicit `STUDYMATE_CONFIG` wins, otherwise config.json sits in the app
/// root (parent of the directory holding the executable)
pub(super) fn get_config_path() -> Result<PathBuf, DashboardError> {
    if let Ok(custom) = env::var(CONFIG_PATH_ENV) {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            debug!(path = %trimmed, "Config path taken from environment");
            return Ok(PathBuf::from(trimmed));
        }
    }

    // Executable is at: app_root/bin/studymate-live
    if let Ok(exe_path) = env::current_exe() {
        debug!(path = %exe_path.display(), "Executable path detected");

        if let Some(app_root) = exe_path.parent().and_then(|bin_dir| bin_dir.parent()) {
            let config_path = app_root.join("config.json");
            debug!(path = %config_path.display(), "Looking for config");
            return Ok(config_path);
        }
    }

    warn!("Using fallback: looking for config.json in current directory");
    Ok(PathBuf::from("config.json"))
}
