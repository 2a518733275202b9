//! Configuration management for the BMI Insights backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: BMI__)

use anyhow::Result;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment variables consulted for the LLM API key when none is configured
const API_KEY_FALLBACK_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Seconds the router waits past the LLM client timeout
const TIMEOUT_HEADROOM_SECS: u64 = 5;

/// Application configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
}

/// AI/LLM configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct AiConfig {
    /// Base URL of the Generative Language API
    pub base_url: String,
    pub model: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: None,
            timeout_secs: 30,
            temperature: 0.7,
        }
    }
}

impl AiConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                request_timeout_secs: 30,
                body_limit_bytes: 16 * 1024,
            },
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with BMI__ prefix
    ///
    /// When no API key is configured, `GEMINI_API_KEY` then `GOOGLE_API_KEY`
    /// are consulted.
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (BMI__ prefix)
            // e.g., BMI__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("BMI").separator("__"))
            .build()?;

        let mut config: AppConfig = config.try_deserialize()?;
        if config.ai.api_key.is_none() {
            config.ai.api_key = fallback_api_key(|name| env::var(name).ok());
        }
        Ok(config)
    }

    /// Router-level request timeout
    ///
    /// Always outlasts the LLM client timeout so that a slow provider fails
    /// as an upstream error instead of a server timeout.
    pub fn request_timeout(&self) -> Duration {
        let floor = self.ai.timeout_secs.saturating_add(TIMEOUT_HEADROOM_SECS);
        Duration::from_secs(self.server.request_timeout_secs.max(floor))
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

fn fallback_api_key(lookup: impl Fn(&str) -> Option<String>) -> Option<SecretString> {
    API_KEY_FALLBACK_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .map(SecretString::new)
}
