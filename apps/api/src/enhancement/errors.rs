//! Error taxonomy for the enhancement pipeline.
//!
//! Per-attempt failures (`AttemptFailure`) stay inside the orchestrator. Only
//! `EnhanceError` crosses its public boundary: either the input was rejected
//! before any network call, or every candidate was exhausted.

use thiserror::Error;

use crate::llm_client::CompletionError;

/// Classification of everything that can go wrong while enhancing a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceErrorKind {
    InvalidInput,
    AuthError,
    RateLimitError,
    ServiceError,
    NetworkError,
    Timeout,
    EmptyResponse,
    InvalidResponse,
    EnhancementFailed,
}

impl EnhanceErrorKind {
    /// One friendly sentence suitable for a toast in the web client.
    pub fn user_message(self) -> &'static str {
        match self {
            EnhanceErrorKind::InvalidInput => "Please enter a prompt to enhance.",
            EnhanceErrorKind::AuthError => {
                "The enhancement service is not configured correctly. Please try again later."
            }
            EnhanceErrorKind::RateLimitError => {
                "We're receiving too many requests right now. Please wait a moment and try again."
            }
            EnhanceErrorKind::Timeout => "The AI service took too long to respond. Please try again.",
            EnhanceErrorKind::NetworkError => {
                "We couldn't reach the AI service. Check your connection and try again."
            }
            EnhanceErrorKind::EmptyResponse | EnhanceErrorKind::InvalidResponse => {
                "The AI returned an unusable response. Please try again or rephrase your prompt."
            }
            EnhanceErrorKind::ServiceError | EnhanceErrorKind::EnhancementFailed => {
                "The AI service is temporarily unavailable. Please try again shortly."
            }
        }
    }
}

/// Why a single attempt against a single candidate did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("model returned empty content")]
    EmptyResponse,

    #[error("model returned {actual} characters, expected at least {minimum}")]
    InvalidResponse { minimum: usize, actual: usize },
}

impl AttemptFailure {
    pub fn kind(&self) -> EnhanceErrorKind {
        match self {
            AttemptFailure::Completion(err) => match err {
                CompletionError::Auth { .. } => EnhanceErrorKind::AuthError,
                CompletionError::RateLimited(_) => EnhanceErrorKind::RateLimitError,
                CompletionError::Network(_) => EnhanceErrorKind::NetworkError,
                CompletionError::Timeout => EnhanceErrorKind::Timeout,
                CompletionError::InvalidRequest { .. }
                | CompletionError::Service { .. }
                | CompletionError::MalformedResponse(_) => EnhanceErrorKind::ServiceError,
            },
            AttemptFailure::EmptyResponse => EnhanceErrorKind::EmptyResponse,
            AttemptFailure::InvalidResponse { .. } => EnhanceErrorKind::InvalidResponse,
        }
    }
}

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "enhancement failed after {attempts} attempts across {candidates_tried} candidates: {last_error}"
    )]
    EnhancementFailed {
        candidates_tried: usize,
        attempts: u32,
        last_error: Box<AttemptFailure>,
    },
}

impl EnhanceError {
    pub fn kind(&self) -> EnhanceErrorKind {
        match self {
            EnhanceError::InvalidInput(_) => EnhanceErrorKind::InvalidInput,
            EnhanceError::EnhancementFailed { .. } => EnhanceErrorKind::EnhancementFailed,
        }
    }

    /// User-facing sentence, mapped from the underlying cause rather than the
    /// aggregate failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            EnhanceError::InvalidInput(_) => EnhanceErrorKind::InvalidInput.user_message(),
            EnhanceError::EnhancementFailed { last_error, .. } => {
                last_error.kind().user_message()
            }
        }
    }
}
