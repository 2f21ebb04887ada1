// ── Core error types ──
//
// Errors surfaced by `Plug` operations. Transport-level failures from
// `plugctl-api` are folded into this taxonomy by the `From` impl below;
// device-state checks (postcondition, precondition) originate here.

use thiserror::Error;

use crate::model::RelayState;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ────────────────────────────────────────────────
    /// Unusable address or settings. Raised before any network call.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ── Transport ────────────────────────────────────────────────────
    #[error("Cannot connect to device at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// The device answered with an error status. Rendered as
    /// `<url>: <body>`, exactly what the device returned.
    #[error("{url}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// The body did not match the schema of the selected generation.
    #[error("invalid response body: {message}")]
    Decode { message: String, body: String },

    // ── Device state ─────────────────────────────────────────────────
    /// The device accepted a switch command but echoed the other state.
    #[error("relay is {}", echo_phrase(.reported))]
    Postcondition {
        expected: RelayState,
        reported: RelayState,
    },

    /// A sub-status the operation needs is missing from the response.
    #[error("{message}")]
    Precondition { message: String },

    // ── Operation ────────────────────────────────────────────────────
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn echo_phrase(reported: &RelayState) -> &'static str {
    match reported {
        RelayState::On => "on",
        RelayState::Off => "not on",
    }
}

impl CoreError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Network failure or error status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. } | Self::HttpStatus { .. })
    }

    /// The request succeeded but the device is not in the expected state.
    pub fn is_device_state(&self) -> bool {
        matches!(self, Self::Postcondition { .. } | Self::Precondition { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<plugctl_api::Error> for CoreError {
    fn from(err: plugctl_api::Error) -> Self {
        match err {
            plugctl_api::Error::InvalidAddress { reason } => CoreError::Configuration {
                message: reason,
            },
            plugctl_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            plugctl_api::Error::ClientBuild(message) => {
                CoreError::Internal(format!("HTTP client: {message}"))
            }
            plugctl_api::Error::HttpStatus { url, status, body } => {
                CoreError::HttpStatus { url, status, body }
            }
            plugctl_api::Error::Deserialization { message, body } => {
                CoreError::Decode { message, body }
            }
        }
    }
}
