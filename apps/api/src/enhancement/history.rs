use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::prompt::EnhancedPromptRow;

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Clamps a requested page size into `1..=MAX_HISTORY_LIMIT`.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

/// Returns a user's enhanced prompts, newest first.
pub async fn list_user_prompts(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<EnhancedPromptRow>> {
    Ok(sqlx::query_as::<_, EnhancedPromptRow>(
        r#"
        SELECT id, user_id, original_prompt, enhanced_prompt, model_used, operation, created_at
        FROM enhanced_prompts
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

/// Fetches one enhanced prompt by id.
pub async fn get_prompt(pool: &PgPool, id: Uuid) -> Result<Option<EnhancedPromptRow>> {
    Ok(sqlx::query_as::<_, EnhancedPromptRow>(
        r#"
        SELECT id, user_id, original_prompt, enhanced_prompt, model_used, operation, created_at
        FROM enhanced_prompts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?)
}
