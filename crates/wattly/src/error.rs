//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use wattly_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Could not reach the backend")]
    #[diagnostic(
        code(wattly::connection_failed),
        help(
            "Check that the backend is running and the base URL is right.\n\
             Current default: http://localhost:8080/api\n\
             Override with --base-url or WATTLY_BASE_URL."
        )
    )]
    ConnectionFailed {
        #[source]
        source: CoreError,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(wattly::timeout),
        help("Raise the timeout with --timeout-ms or WATTLY_TIMEOUT_MS.")
    )]
    Timeout,

    #[error("Invalid input: {message}")]
    #[diagnostic(code(wattly::validation))]
    Validation { message: String },

    #[error("Backend rejected the request (HTTP {status}): {message}")]
    #[diagnostic(code(wattly::backend))]
    Backend { status: u16, message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(wattly::config),
        help("Check the config file or the WATTLY_* environment variables.")
    )]
    Config { message: String },

    #[error("{0}")]
    #[diagnostic(code(wattly::general))]
    Other(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::Config { .. } => exit_code::USAGE,
            Self::Backend { .. } | Self::Other(_) => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => Self::Validation { message },
            CoreError::Timeout => Self::Timeout,
            CoreError::ConnectionFailed { .. } => Self::ConnectionFailed { source: err },
            CoreError::Api { status, message } => Self::Backend { status, message },
            CoreError::BadResponse { message } => Self::Other(message),
            CoreError::Internal(message) => Self::Other(message),
        }
    }
}

impl From<wattly_config::ConfigError> for CliError {
    fn from(err: wattly_config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
