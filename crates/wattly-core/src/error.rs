// ── Core error types ──
//
// User-facing errors from wattly-core. Consumers never see raw reqwest
// failures directly; the `From<wattly_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Caller-local errors ──────────────────────────────────────────
    /// Input rejected before any network call was made.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Backend errors ───────────────────────────────────────────────
    /// Non-success response from the backend.
    #[error("Backend error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The backend answered with a body we could not decode.
    #[error("Unexpected response shape: {message}")]
    BadResponse { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` for errors that originate in caller input and
    /// never touched the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wattly_api::Error> for CoreError {
    fn from(err: wattly_api::Error) -> Self {
        match err {
            wattly_api::Error::Transport(ref e) if e.is_timeout() => Self::Timeout,
            wattly_api::Error::Transport(e) => Self::ConnectionFailed {
                reason: e.to_string(),
            },
            wattly_api::Error::InvalidUrl(e) => Self::Internal(format!("invalid URL: {e}")),
            wattly_api::Error::Status { status, reason } => Self::Api {
                status,
                message: reason,
            },
            wattly_api::Error::Deserialization { message, .. } => Self::BadResponse { message },
        }
    }
}
