//! HTTP request handlers for the Reqstat server

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::metrics::{MetricsOpts, RequestMetrics};
use std::sync::Arc;

pub mod health;
pub mod metrics;

/// Application state shared across all handlers
///
/// Contains the configuration and the request metrics aggregator. All
/// fields are cheap to clone across Axum handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    metrics: RequestMetrics,
}

impl AppState {
    /// Create a new AppState from configuration
    ///
    /// Builds the request metrics aggregator from the configured namespace
    /// and bucket overrides. Registration failure (duplicate namespace,
    /// invalid buckets) is a configuration error and fatal at startup.
    pub fn new(config: Arc<Config>) -> AppResult<Self> {
        let metrics = RequestMetrics::new(
            &config.metrics.namespace,
            MetricsOpts {
                buckets: config.metrics.buckets.clone(),
            },
        )
        .map_err(|e| AppError::Config(format!("failed to register request metrics: {e}")))?;

        Ok(Self { config, metrics })
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the request metrics aggregator
    pub fn metrics(&self) -> &RequestMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000

[metrics]
namespace = "test"
"#;
        toml::from_str(toml).expect("should parse test config")
    }

    #[test]
    fn test_appstate_new_creates_state() {
        let state = AppState::new(Arc::new(create_test_config())).expect("should create state");

        assert_eq!(state.config().server.port, 3000);
        assert_eq!(state.config().metrics.namespace, "test");
    }

    #[test]
    fn test_appstate_is_clonable() {
        let state = AppState::new(Arc::new(create_test_config())).expect("should create state");

        let state2 = state.clone();
        assert_eq!(state2.config().server.port, 3000);
    }

    #[test]
    fn test_appstate_clones_share_metrics() {
        let state = AppState::new(Arc::new(create_test_config())).expect("should create state");
        let state2 = state.clone();

        state
            .metrics()
            .record(
                axum::http::StatusCode::OK,
                &axum::http::Method::GET,
                "/shared",
                1.0,
            )
            .expect("should record");

        let output = state2.metrics().gather().expect("should gather");
        assert!(output.contains("path=\"/shared\""));
    }
}
