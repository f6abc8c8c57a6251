use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnhancedPromptRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub original_prompt: String,
    pub enhanced_prompt: String,
    pub model_used: String,
    pub operation: String,
    pub created_at: DateTime<Utc>,
}
