//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use plugctl_config::ConfigError;
use plugctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const DEVICE_STATE: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const DECODE: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to device at {url}")]
    #[diagnostic(
        code(plugctl::connection_failed),
        help(
            "Check that the plug is powered and reachable.\n\
             URL: {url}\n\
             Try: plugctl --address <host> info"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{url}: {body}")]
    #[diagnostic(
        code(plugctl::http_status),
        help("The device rejected the request (HTTP {status}). For 401, pass --username and --password.")
    )]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    // ── Device ───────────────────────────────────────────────────────
    #[error("invalid response body: {message}")]
    #[diagnostic(
        code(plugctl::decode),
        help("The device answered with an unexpected schema. Check --generation (gen1 or gen2).")
    )]
    Decode { message: String },

    #[error("{message}")]
    #[diagnostic(code(plugctl::device_state))]
    DeviceState { message: String },

    #[error("Operation not supported: {operation}")]
    #[diagnostic(code(plugctl::unsupported))]
    Unsupported { operation: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No device address configured")]
    #[diagnostic(
        code(plugctl::no_address),
        help(
            "Pass --address (or set PLUGCTL_ADDRESS), or create a profile:\n\
             plugctl config set address <host>\n\
             Config file: {path}"
        )
    )]
    NoAddress { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(plugctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: plugctl --profile {name} config set address <host>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(plugctl::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(plugctl::config))]
    Config(Box<ConfigError>),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(plugctl::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(plugctl::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::HttpStatus { .. } => exit_code::CONNECTION,
            Self::Decode { .. } => exit_code::DECODE,
            Self::DeviceState { .. } => exit_code::DEVICE_STATE,
            Self::NoAddress { .. }
            | Self::ProfileNotFound { .. }
            | Self::Validation { .. }
            | Self::Config(_)
            | Self::Unsupported { .. } => exit_code::USAGE,
            Self::Io(_) | Self::Internal(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration { message } => CliError::Validation {
                field: "address".into(),
                reason: message,
            },
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },
            CoreError::HttpStatus { url, status, body } => {
                CliError::HttpStatus { url, status, body }
            }
            CoreError::Decode { message, body: _ } => CliError::Decode { message },
            err @ (CoreError::Postcondition { .. } | CoreError::Precondition { .. }) => {
                CliError::DeviceState {
                    message: err.to_string(),
                }
            }
            CoreError::Unsupported { operation } => CliError::Unsupported { operation },
            CoreError::Io(e) => CliError::Io(e),
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(Box::new(other)),
        }
    }
}
