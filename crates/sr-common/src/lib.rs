use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod logging;

// ============================================================================
// Callback Types
// ============================================================================

/// Key/value body of an RMS callback, forwarded verbatim as JSON.
///
/// One map per scheduled notification; owned exclusively by the background
/// task that delivers it. A BTreeMap keeps the serialized body identical
/// across retry attempts.
pub type CallbackParams = BTreeMap<String, String>;

/// Station-side dock events that trigger an RMS callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockEventKind {
    /// Robot is about to dock - RMS gets the `dock_ready` callback.
    Prepare,
    /// Docking has started/finished on the station side - RMS gets the
    /// `dock_finish` callback.
    Finish,
}

impl std::fmt::Display for DockEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DockEventKind::Prepare => write!(f, "prepare"),
            DockEventKind::Finish => write!(f, "finish"),
        }
    }
}

/// Acknowledgement body returned by RMS callback endpoints.
///
/// A delivery attempt only counts as successful when the HTTP status is 2xx
/// AND `code == 0`; anything else is retried.
#[derive(Debug, Clone, Deserialize)]
pub struct RmsAck {
    pub code: i32,
    #[serde(default)]
    pub msg: String,
}

impl RmsAck {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

// ============================================================================
// API Envelope
// ============================================================================

/// The `{code, msg}` envelope every WCS-facing endpoint returns.
///
/// `code == 0` means success, `code == 1` means a validation error or a busy
/// refusal. HTTP status is always 200; the station controller only inspects
/// the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: i32,
    pub msg: String,
}

impl ApiResponse {
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            code: 0,
            msg: msg.into(),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            code: 1,
            msg: msg.into(),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::error(format!("invalid request: {} must not be empty", field))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StationRelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

pub type Result<T> = std::result::Result<T, StationRelayError>;
