/// LLM Client: the single point of entry for all chat-completion calls in PromptShift.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// Retries and model fallback live in `enhancement::orchestrator`; this module
/// performs exactly one round-trip per call and classifies the outcome.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::errors::ConfigError;

pub mod prompts;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("authentication failed (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("request rejected (status {status}): {message}")]
    InvalidRequest { status: u16, message: String },

    #[error("service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    /// Maps a non-success HTTP status and its body onto an error kind.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());
        match status {
            401 | 403 => CompletionError::Auth { status, message },
            429 => CompletionError::RateLimited(message),
            400 | 404 | 413 | 422 => CompletionError::InvalidRequest { status, message },
            _ => CompletionError::Service { status, message },
        }
    }

    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout
        } else {
            CompletionError::Network(err.to_string())
        }
    }
}

/// One chat-completion call: a system prompt, a user prompt and sampling knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Anything that can turn a `CompletionRequest` into model output.
///
/// Implemented by `GroqClient` in production and by test doubles in the
/// orchestrator tests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;
}

/// Connection settings for the hosted completion API.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for Groq's OpenAI-compatible `chat/completions` endpoint.
/// Holds one shared `reqwest::Client`, so cloning is cheap and the handle is
/// safe to use from many concurrent requests.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GroqClient {
    pub fn new(settings: &CompletionSettings) -> Result<Self, ConfigError> {
        if settings.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        let body = ChatRequest {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(CompletionError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::from_status(status.as_u16(), &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(CompletionError::from_transport)?;
        let parsed = parse_chat_response(&bytes)?;

        if let Some(usage) = parsed.usage {
            debug!(
                "Completion from {}: prompt_tokens={}, completion_tokens={}",
                request.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(parsed)
    }
}

/// Extracts the first choice's content. A missing or null content field is an
/// empty completion, not a malformed one.
fn parse_chat_response(bytes: &[u8]) -> Result<Completion, CompletionError> {
    let response: ChatResponse = serde_json::from_slice(bytes)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("response has no choices".into()))?;

    Ok(Completion {
        text: choice.message.content.unwrap_or_default(),
        usage: response.usage,
    })
}
