//! Axum route handlers for the Enhancement API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enhancement::history::{clamp_limit, get_prompt, list_user_prompts};
use crate::enhancement::models::{EnhancementRequest, EnhancementResult, OperationKind};
use crate::errors::AppError;
use crate::models::prompt::EnhancedPromptRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EnhanceBody {
    pub prompt: String,
    #[serde(default)]
    pub target_model: Option<String>,
    /// Only honoured by `/enhance`.
    #[serde(default)]
    pub custom_instructions: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

impl EnhanceBody {
    fn into_request(self, operation: OperationKind) -> EnhancementRequest {
        let mut request = EnhancementRequest::new(self.prompt, operation)
            .with_target_model(self.target_model.unwrap_or_default())
            .with_user(self.user_id);
        if operation == OperationKind::Enhance {
            if let Some(custom) = self.custom_instructions {
                request = request.with_custom_instructions(custom);
            }
        }
        request
    }
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub enhanced_prompt: String,
    pub model_used: String,
    pub elapsed_ms: u64,
    pub attempts: u32,
}

impl From<EnhancementResult> for EnhanceResponse {
    fn from(result: EnhancementResult) -> Self {
        Self {
            enhanced_prompt: result.text,
            model_used: result.model_used,
            elapsed_ms: result.elapsed_ms,
            attempts: result.attempts,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn run(
    state: &AppState,
    body: EnhanceBody,
    operation: OperationKind,
) -> Result<Json<EnhanceResponse>, AppError> {
    let request = body.into_request(operation);
    let result = state.enhancer.enhance(&request).await?;
    Ok(Json(result.into()))
}

/// POST /api/v1/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(body): Json<EnhanceBody>,
) -> Result<Json<EnhanceResponse>, AppError> {
    run(&state, body, OperationKind::Enhance).await
}

/// POST /api/v1/expand
///
/// Elaborates an already-enhanced prompt further.
pub async fn handle_expand(
    State(state): State<AppState>,
    Json(body): Json<EnhanceBody>,
) -> Result<Json<EnhanceResponse>, AppError> {
    run(&state, body, OperationKind::Expand).await
}

/// POST /api/v1/condense
pub async fn handle_condense(
    State(state): State<AppState>,
    Json(body): Json<EnhanceBody>,
) -> Result<Json<EnhanceResponse>, AppError> {
    run(&state, body, OperationKind::Condense).await
}

/// GET /api/v1/models
///
/// The default candidate order; any of these may be passed as `target_model`.
pub async fn handle_list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.enhancer.policy().candidates.clone(),
    })
}

/// GET /api/v1/prompts?user_id=&limit=
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<EnhancedPromptRow>>, AppError> {
    let rows = list_user_prompts(&state.db, params.user_id, clamp_limit(params.limit))
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(rows))
}

/// GET /api/v1/prompts/:id
pub async fn handle_get_prompt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnhancedPromptRow>, AppError> {
    let row = get_prompt(&state.db, id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("Prompt {id} not found")))?;
    Ok(Json(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_body_minimal_json() {
        let body: EnhanceBody = serde_json::from_str(r#"{"prompt": "write a poem"}"#).unwrap();
        let request = body.into_request(OperationKind::Enhance);
        assert_eq!(request.raw_text, "write a poem");
        assert!(request.target_model_hint.is_empty());
        assert!(request.user_id.is_none());
    }

    #[test]
    fn test_custom_instructions_only_forwarded_for_enhance() {
        let json = serde_json::json!({
            "prompt": "write a poem",
            "custom_instructions": "be terse",
            "target_model": "gemma2-9b-it"
        });
        let body: EnhanceBody = serde_json::from_value(json.clone()).unwrap();
        let enhance = body.into_request(OperationKind::Enhance);
        assert_eq!(enhance.custom_instructions.as_deref(), Some("be terse"));
        assert_eq!(enhance.target_model_hint, "gemma2-9b-it");

        let body: EnhanceBody = serde_json::from_value(json).unwrap();
        let expand = body.into_request(OperationKind::Expand);
        assert!(expand.custom_instructions.is_none());
    }

    #[test]
    fn test_response_from_result() {
        let response: EnhanceResponse = EnhancementResult {
            text: "detailed".to_string(),
            model_used: "llama-3.1-8b-instant".to_string(),
            elapsed_ms: 812,
            attempts: 2,
        }
        .into();
        assert_eq!(response.enhanced_prompt, "detailed");
        assert_eq!(response.attempts, 2);
    }
}
