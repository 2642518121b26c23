//! Configuration management with validation and defaults
//!
//! Values come from (lowest to highest precedence) built-in defaults, an
//! optional TOML file, and `ATOMIQ_*` environment variables. The CLI applies
//! its own flags on top.

use crate::errors::{AtomiqResult, ConfigurationError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_API_BASE_URL: &str = "ATOMIQ_API_BASE_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "ATOMIQ_API_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "ATOMIQ_LOG_LEVEL";

/// Largest page the API serves
const MAX_LOOKUP_WINDOW: u32 = 1_000;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    pub api: ApiClientConfig,
    pub logging: LoggingConfig,
}

/// Casino REST API connection settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// How many recent bets are scanned when looking up a transaction
    pub lookup_window: u32,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 30,
            lookup_window: 100,
        }
    }
}

impl ApiClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Default `EnvFilter` directive for this level
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "atomiq_verify=error",
            LogLevel::Warn => "atomiq_verify=warn",
            LogLevel::Info => "atomiq_verify=info",
            LogLevel::Debug => "atomiq_verify=debug",
            LogLevel::Trace => "atomiq_verify=trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(ConfigurationError::InvalidValue {
                field: "logging.level".to_string(),
                value: other.to_string(),
                reason: "expected one of error, warn, info, debug, trace".to_string(),
            }),
        }
    }
}

impl VerifierConfig {
    /// Load defaults, then the TOML file at `path` if given, then the
    /// environment, and validate the result.
    pub fn load(path: Option<&Path>) -> AtomiqResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AtomiqResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::LoadFailed(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> AtomiqResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `ATOMIQ_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_API_BASE_URL) {
            self.api.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_API_TIMEOUT_SECS) {
            self.api.request_timeout_secs =
                timeout.trim().parse().map_err(|_| ConfigurationError::InvalidValue {
                    field: ENV_API_TIMEOUT_SECS.to_string(),
                    value: timeout.clone(),
                    reason: "expected a whole number of seconds".to_string(),
                })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level.parse()?;
        }
        Ok(())
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigurationError::InvalidValue {
                field: "api.base_url".to_string(),
                value: self.api.base_url.clone(),
                reason: "must start with http:// or https://".to_string(),
            });
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ConfigurationError::ValidationFailed(
                "api.request_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.api.lookup_window == 0 || self.api.lookup_window > MAX_LOOKUP_WINDOW {
            return Err(ConfigurationError::ValidationFailed(format!(
                "api.lookup_window must be between 1 and {}",
                MAX_LOOKUP_WINDOW
            )));
        }

        Ok(())
    }
}
