use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::enhancement::errors::{EnhanceError, EnhanceErrorKind};

/// Raised synchronously while wiring up the service, never at first use.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("completion API key is missing or empty")]
    MissingApiKey,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("candidate model list is empty")]
    NoCandidates,

    #[error("max attempts per candidate must be at least 1")]
    ZeroAttempts,

    #[error("backoff jitter ({jitter_ms}ms) must be smaller than the base delay ({base_ms}ms)")]
    JitterTooLarge { jitter_ms: u128, base_ms: u128 },
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Enhancement error: {0}")]
    Enhancement(#[from] EnhanceError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Access denied".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Enhancement(e) => enhancement_response_parts(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn enhancement_response_parts(err: &EnhanceError) -> (StatusCode, &'static str, String) {
    match err {
        EnhanceError::InvalidInput(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        EnhanceError::EnhancementFailed { last_error, .. } => {
            tracing::error!("Enhancement failed: {err}");
            let (status, code) = match last_error.kind() {
                EnhanceErrorKind::RateLimitError => {
                    (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED")
                }
                EnhanceErrorKind::AuthError => {
                    (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
                }
                _ => (StatusCode::BAD_GATEWAY, "ENHANCEMENT_FAILED"),
            };
            (status, code, err.user_message().to_string())
        }
    }
}
