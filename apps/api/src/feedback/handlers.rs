use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use uuid::Uuid;

use crate::enhancement::history::get_prompt;
use crate::errors::AppError;
use crate::feedback::validation::{validate_feedback, FeedbackRequest};
use crate::models::feedback::FeedbackRow;
use crate::state::AppState;

/// POST /api/v1/feedback
///
/// Append-only: every submission is a new row, even for the same prompt.
pub async fn handle_submit_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackRow>), AppError> {
    let req = validate_feedback(req).map_err(AppError::Validation)?;

    if let Some(prompt_id) = req.prompt_id {
        get_prompt(&state.db, prompt_id)
            .await
            .map_err(AppError::Internal)?
            .ok_or_else(|| AppError::NotFound(format!("Prompt {prompt_id} not found")))?;
    }

    let row = sqlx::query_as::<_, FeedbackRow>(
        r#"
        INSERT INTO feedback (id, user_id, prompt_id, rating, comment)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, prompt_id, rating, comment, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(req.prompt_id)
    .bind(req.rating)
    .bind(&req.comment)
    .fetch_one(&state.db)
    .await?;

    info!("Recorded feedback {} (rating {})", row.id, row.rating);
    Ok((StatusCode::CREATED, Json(row)))
}
