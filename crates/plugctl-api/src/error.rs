use thiserror::Error;

/// Top-level error type for the `plugctl-api` crate.
///
/// Covers every failure mode of a single device round-trip: address
/// validation, transport, HTTP status, and schema decoding.
/// `plugctl-core` maps these into its own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Address ─────────────────────────────────────────────────────
    /// The device address is unusable (no host, unparseable URL).
    #[error("Invalid device address: {reason}")]
    InvalidAddress { reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// The device answered with a non-success status.
    #[error("{url}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("invalid response body: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for network-level failures and error statuses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    /// Returns `true` if the device answered but the body did not match
    /// the expected schema.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }

    /// The URL the failing request was sent to, when known.
    pub fn url(&self) -> Option<String> {
        match self {
            Self::Transport(e) => e.url().map(ToString::to_string),
            Self::HttpStatus { url, .. } => Some(url.clone()),
            _ => None,
        }
    }
}
