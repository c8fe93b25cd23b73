//! Configuration management for Reqstat
//!
//! Parses TOML configuration files and provides typed access to settings.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Metrics configuration
///
/// Loaded via deserialization and validated via Config::validate(), so the
/// aggregator only ever sees a namespace and bucket set that passed
/// validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    /// Namespace prefixed to both metric names
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Latency histogram bucket upper bounds in milliseconds.
    ///
    /// Must be strictly increasing. Empty means the built-in defaults
    /// (300, 1000, 2500, 5000).
    #[serde(default)]
    pub buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            buckets: Vec::new(),
        }
    }
}

fn default_namespace() -> String {
    "http".to_string()
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate settings that serde cannot express.
    pub fn validate(&self) -> AppResult<()> {
        if self.metrics.namespace.is_empty() {
            return Err(AppError::Config(
                "metrics.namespace must not be empty".to_string(),
            ));
        }
        if let Some(first) = self.metrics.buckets.first() {
            if *first <= 0.0 {
                return Err(AppError::Config(format!(
                    "metrics.buckets must be positive, got {first}"
                )));
            }
        }
        if !self.metrics.buckets.windows(2).all(|w| w[0] < w[1]) {
            return Err(AppError::Config(format!(
                "metrics.buckets must be strictly increasing, got {:?}",
                self.metrics.buckets
            )));
        }
        Ok(())
    }
}
