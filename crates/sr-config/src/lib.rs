//! StationRelay Configuration System
//!
//! This crate provides TOML-based configuration with environment variable
//! override support. All configuration is injected at construction time -
//! there are no global config holders, and a missing RMS host is caught by
//! `validate()` before any dispatcher is built.

use serde::{Deserialize, Serialize};
use sr_common::DockEventKind;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub rms: RmsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            rms: RmsConfig::default(),
        }
    }
}

/// HTTP server configuration for the WCS-facing API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 10001,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// RMS endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RmsConfig {
    /// RMS host. Required - `validate()` rejects an empty host.
    pub host: String,
    pub port: u16,
    pub request: RequestConfig,
    pub apis: RmsApis,
}

impl Default for RmsConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 8080,
            request: RequestConfig::default(),
            apis: RmsApis::default(),
        }
    }
}

/// Per-request settings for RMS callbacks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Per-attempt HTTP timeout in seconds
    pub timeout_secs: u64,
    /// Delay before the first attempt, reused as the fixed retry interval
    pub delay_secs: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            delay_secs: 3,
        }
    }
}

impl RequestConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// Relative api paths on the RMS side, combined with host+port by
/// [`RmsConfig::callback_url`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RmsApis {
    pub dock_ready: String,
    pub dock_finish: String,
}

impl Default for RmsApis {
    fn default() -> Self {
        Self {
            dock_ready: "api/rms/dock_ready".to_string(),
            dock_finish: "api/rms/dock_finish".to_string(),
        }
    }
}

impl RmsConfig {
    /// Reject configurations that cannot produce a callback URL.
    ///
    /// An unset RMS host is a startup error, not a runtime condition - it
    /// must fail before any notification could be scheduled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "rms.host must be set".to_string(),
            ));
        }
        if self.apis.dock_ready.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "rms.apis.dock_ready must be set".to_string(),
            ));
        }
        if self.apis.dock_finish.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "rms.apis.dock_finish must be set".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the callback URL for a dock event.
    ///
    /// Host and port always come from configuration; this is the single
    /// source of truth for URL construction.
    pub fn callback_url(&self, kind: DockEventKind) -> String {
        let api = match kind {
            DockEventKind::Prepare => &self.apis.dock_ready,
            DockEventKind::Finish => &self.apis.dock_finish,
        };
        format!(
            "http://{}:{}/{}",
            self.host,
            self.port,
            api.trim_start_matches('/')
        )
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        let loader = ConfigLoader::new();
        loader.load()
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# StationRelay Configuration
# Environment variables (STATION_RELAY_*) override these settings

[http]
port = 10001
host = "0.0.0.0"

[rms]
host = "rms.example.com"
port = 8080

[rms.request]
timeout_secs = 10
delay_secs = 3

[rms.apis]
dock_ready = "api/rms/dock_ready"
dock_finish = "api/rms/dock_finish"
"#
        .to_string()
    }
}
