//! Advice provider boundary
//!
//! The advice collaborator is reached through [`AdviceProvider`]; the
//! orchestrator only sees a structured request going out and raw advice (or a
//! [`ProviderError`]) coming back.

use async_trait::async_trait;
use bmi_insights_shared::{AdviceRequest, BmiError, RawAdvice};
use thiserror::Error;

/// Errors that can occur when calling the advice collaborator
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport error (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status code
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Provider returned 429 Too Many Requests
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Response could not be interpreted as advice JSON
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider cannot be called with the current configuration
    #[error("advice service is not configured: {0}")]
    NotConfigured(String),
}

impl From<ProviderError> for BmiError {
    fn from(err: ProviderError) -> Self {
        BmiError::AdviceUnavailable(err.to_string())
    }
}

/// External generator of personalized advice and chart suggestions
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Whether the provider has what it needs to make calls
    fn is_configured(&self) -> bool;

    /// Make exactly one call to the collaborator
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<RawAdvice, ProviderError>;
}
