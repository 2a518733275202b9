//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! State is built once at startup and read-only afterwards; every field is
//! cheap to clone across tasks.

use crate::config::AppConfig;
use crate::services::{AdviceProvider, GeminiClient, ProviderError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Advice collaborator
    pub advice: Arc<dyn AdviceProvider>,
    /// Prometheus handle, present when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state with the Gemini provider built from `config.ai`
    pub fn new(config: AppConfig) -> Result<Self, ProviderError> {
        let provider = GeminiClient::new(&config.ai)?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create state around an explicit advice provider
    pub fn with_provider(config: AppConfig, advice: Arc<dyn AdviceProvider>) -> Self {
        Self {
            config: Arc::new(config),
            advice,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the advice provider
    #[inline]
    pub fn advice(&self) -> &dyn AdviceProvider {
        self.advice.as_ref()
    }
}
