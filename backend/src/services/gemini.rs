//! Google Generative Language API advice provider
//!
//! Sends one `generateContent` call per advice request with JSON output
//! requested, then parses the first candidate's text as [`RawAdvice`].

use crate::config::AiConfig;
use crate::services::prompts::{build_advice_prompt, SYSTEM_INSTRUCTION};
use crate::services::provider::{AdviceProvider, ProviderError};
use async_trait::async_trait;
use bmi_insights_shared::{AdviceRequest, RawAdvice};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Longest error body kept in [`ProviderError::Api`]
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Gemini-backed advice provider
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    temperature: f32,
}

impl GeminiClient {
    /// Build a client from AI configuration
    pub fn new(config: &AiConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config
                .api_key
                .as_ref()
                .map(|key| SecretString::new(key.expose_secret().clone())),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_body(&self, request: &AdviceRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(SYSTEM_INSTRUCTION)],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(build_advice_prompt(request))],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[async_trait]
impl AdviceProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_advice(&self, request: &AdviceRequest) -> Result<RawAdvice, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("missing API key".to_string()))?;

        debug!(model = %self.model, "Calling generateContent");

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&self.build_body(request))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body: GenerateContentResponse = resp.json().await?;

        let text = body.first_text()?;
        parse_advice(&text)
    }
}

// ============================================================================
// Response helpers
// ============================================================================

/// Check an HTTP response for error statuses
///
/// - **429 Too Many Requests** → [`ProviderError::RateLimited`] with
///   `Retry-After` parsing (falls back to 60 s).
/// - **Non-success status** → [`ProviderError::Api`] with a truncated body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let message: String = resp
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();
        return Err(ProviderError::Api { status, message });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}

/// Locate the JSON object in collaborator text
///
/// Takes the span from the first `{` to the last `}`, which drops any code
/// fence (whatever its tag) and surrounding prose.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Parse collaborator text into raw advice
pub fn parse_advice(text: &str) -> Result<RawAdvice, ProviderError> {
    serde_json::from_str(extract_json(text))
        .map_err(|e| ProviderError::Parse(format!("advice JSON: {}", e)))
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn first_text(&self) -> Result<String, ProviderError> {
        let Some(candidate) = self.candidates.first() else {
            let reason = self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
                .unwrap_or("no candidates returned");
            return Err(ProviderError::Parse(format!("empty response: {}", reason)));
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("no text");
            return Err(ProviderError::Parse(format!("empty candidate: {}", reason)));
        }
        Ok(text)
    }
}
