//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "station-relay.toml",
    "./config/config.toml",
    "./config/station-relay.toml",
    "/etc/station-relay/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        // Start with defaults
        let mut config = AppConfig::default();

        // Try to load from file
        if let Some(path) = self.find_config_file() {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        // Apply environment variable overrides
        self.apply_env_overrides(&mut config);

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(&self) -> Option<PathBuf> {
        // Check explicit path first
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
        }

        // Check STATION_RELAY_CONFIG env var
        if let Ok(path) = env::var("STATION_RELAY_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // Search standard paths
        for path in CONFIG_PATHS {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, config: &mut AppConfig) {
        // HTTP
        if let Ok(val) = env::var("STATION_RELAY_HTTP_PORT") {
            if let Ok(port) = val.parse() {
                config.http.port = port;
            }
        }
        if let Ok(val) = env::var("STATION_RELAY_HTTP_HOST") {
            config.http.host = val;
        }

        // RMS
        if let Ok(val) = env::var("STATION_RELAY_RMS_HOST") {
            config.rms.host = val;
        }
        if let Ok(val) = env::var("STATION_RELAY_RMS_PORT") {
            if let Ok(port) = val.parse() {
                config.rms.port = port;
            }
        }
        if let Ok(val) = env::var("STATION_RELAY_RMS_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.rms.request.timeout_secs = secs;
            }
        }
        if let Ok(val) = env::var("STATION_RELAY_RMS_DELAY_SECS") {
            if let Ok(secs) = val.parse() {
                config.rms.request.delay_secs = secs;
            }
        }
        if let Ok(val) = env::var("STATION_RELAY_RMS_DOCK_READY_API") {
            config.rms.apis.dock_ready = val;
        }
        if let Ok(val) = env::var("STATION_RELAY_RMS_DOCK_FINISH_API") {
            config.rms.apis.dock_finish = val;
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
