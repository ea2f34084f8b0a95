// ── Client configuration ──

use std::time::Duration;

use url::Url;

use crate::error::CoreError;

/// Connection settings for the energy backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API (e.g. `http://localhost:8080/api`).
    pub base_url: Url,

    /// Hard per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let base_url =
            Url::parse(wattly_api::DEFAULT_BASE_URL).expect("default base URL is valid");
        Self {
            base_url,
            timeout: wattly_api::DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Parse a config from raw settings, validating the URL.
    pub fn from_parts(base_url: &str, timeout_ms: u64) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url).map_err(|e| CoreError::Validation {
            message: format!("invalid base_url '{base_url}': {e}"),
        })?;
        Ok(Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Build the transport client described by this config.
    pub fn api_client(&self) -> Result<wattly_api::ApiClient, CoreError> {
        wattly_api::ApiClient::new(self.base_url.as_str(), self.timeout)
            .map_err(|e| CoreError::Internal(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url.as_str(), "http://localhost:8080/api");
        assert_eq!(cfg.timeout, Duration::from_millis(30_000));
    }

    #[test]
    fn bad_url_is_a_validation_error() {
        let err = ClientConfig::from_parts("not a url", 1000).unwrap_err();
        assert!(err.is_validation());
    }
}
