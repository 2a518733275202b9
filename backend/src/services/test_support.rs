//! Test doubles for the advice provider boundary

use crate::services::provider::{AdviceProvider, ProviderError};
use async_trait::async_trait;
use bmi_insights_shared::{AdviceRequest, RawAdvice};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Provider returning a canned result and recording calls
pub struct StubProvider {
    reply: Result<serde_json::Value, String>,
    calls: AtomicUsize,
    pub last_request: Mutex<Option<AdviceRequest>>,
}

impl StubProvider {
    /// Reply with the given collaborator JSON
    pub fn ok(value: serde_json::Value) -> Self {
        Self {
            reply: Ok(value),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Fail every call with an API error carrying `message`
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdviceProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate_advice(&self, request: &AdviceRequest) -> Result<RawAdvice, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.reply {
            Ok(value) => serde_json::from_value(value.clone())
                .map_err(|e| ProviderError::Parse(e.to_string())),
            Err(message) => Err(ProviderError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}
