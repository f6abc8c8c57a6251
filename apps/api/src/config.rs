use std::time::Duration;

use anyhow::{Context, Result};

use crate::enhancement::candidates::DEFAULT_MODELS;
use crate::enhancement::retry::RetryPolicy;
use crate::llm_client::CompletionSettings;

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub llm_timeout_secs: u64,
    pub models: Vec<String>,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_jitter_ms: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    pub admin_token: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            // Emptiness is rejected by GroqClient::new with a ConfigError.
            groq_api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            models: std::env::var("PROMPTSHIFT_MODELS")
                .map(|raw| parse_model_list(&raw))
                .unwrap_or_else(|_| DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()),
            max_attempts: parse_env("ENHANCE_MAX_ATTEMPTS", 3)?,
            base_delay_ms: parse_env("ENHANCE_BASE_DELAY_MS", 1000)?,
            max_jitter_ms: parse_env("ENHANCE_MAX_JITTER_MS", 250)?,
            temperature: parse_env("ENHANCE_TEMPERATURE", 0.7)?,
            max_tokens: parse_env("ENHANCE_MAX_TOKENS", 2048)?,
            admin_token: std::env::var("ADMIN_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Settings for the hosted chat-completion client.
    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            api_key: self.groq_api_key.clone(),
            base_url: self.groq_base_url.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
        }
    }

    /// Retry/fallback policy for the enhancement orchestrator.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            candidates: self.models.clone(),
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_jitter: Duration::from_millis(self.max_jitter_ms),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid value, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated model list, dropping blanks and duplicates while
/// keeping first-seen order.
fn parse_model_list(raw: &str) -> Vec<String> {
    let mut models: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !models.iter().any(|m| m == name) {
            models.push(name.to_string());
        }
    }
    models
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_list_trims_and_dedups() {
        let models = parse_model_list(" a-model, b-model ,,a-model, c-model ");
        assert_eq!(models, vec!["a-model", "b-model", "c-model"]);
    }

    #[test]
    fn test_parse_model_list_empty_input() {
        assert!(parse_model_list(" , ,").is_empty());
    }

    #[test]
    fn test_retry_policy_carries_config_values() {
        let config = Config {
            database_url: "postgres://localhost/promptshift".to_string(),
            groq_api_key: "key".to_string(),
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            llm_timeout_secs: 30,
            models: vec!["m1".to_string(), "m2".to_string()],
            max_attempts: 4,
            base_delay_ms: 500,
            max_jitter_ms: 100,
            temperature: 0.5,
            max_tokens: 1024,
            admin_token: None,
            port: 8080,
            rust_log: "info".to_string(),
        };
        let policy = config.retry_policy();
        assert_eq!(policy.candidates, vec!["m1", "m2"]);
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.max_jitter, Duration::from_millis(100));

        let settings = config.completion_settings();
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.base_url, DEFAULT_GROQ_BASE_URL);
    }
}
