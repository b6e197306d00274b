//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::service::KeyService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Key generation service.
    pub key_service: Arc<KeyService>,
    /// Prometheus recorder handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidConfig`] if the configured key format is
    /// invalid.
    pub fn new(config: Arc<AppConfig>) -> Result<Self> {
        let properties = config
            .key_format
            .build()
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        let key_service = Arc::new(KeyService::new(Arc::new(properties), &config.generation));

        Ok(Self {
            config,
            key_service,
            metrics: None,
        })
    }

    /// Attach a Prometheus handle for the metrics endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
