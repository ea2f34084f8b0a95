//! Shared configuration for the wattly CLI.
//!
//! TOML file merged with `WATTLY_*` environment variables via figment,
//! resolved to `wattly_core::ClientConfig`. Mirrors the backend's
//! environment-style settings: base URL and request timeout.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use wattly_core::ClientConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// On-disk / environment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL (e.g. `http://localhost:8080/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hard per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_owned()
}

fn default_timeout_ms() -> u64 {
    30_000
}

// ── Loading ─────────────────────────────────────────────────────────

/// Default config file location (`~/.config/wattly/config.toml` on Linux).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "wattly")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("wattly.toml"))
}

/// Load configuration: defaults, then the TOML file, then `WATTLY_*`
/// environment variables (highest precedence).
pub fn load() -> Result<Config, ConfigError> {
    load_from(&config_path())
}

/// Load configuration from an explicit file path (testing / `--config`).
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WATTLY_"))
        .extract()?;
    Ok(config)
}

/// Resolve a loaded config into the core client settings.
pub fn resolve(config: &Config) -> Result<ClientConfig, ConfigError> {
    if config.timeout_ms == 0 {
        return Err(ConfigError::Validation {
            field: "timeout_ms".to_owned(),
            reason: "must be greater than zero".to_owned(),
        });
    }
    ClientConfig::from_parts(&config.base_url, config.timeout_ms).map_err(|e| {
        ConfigError::Validation {
            field: "base_url".to_owned(),
            reason: e.to_string(),
        }
    })
}
