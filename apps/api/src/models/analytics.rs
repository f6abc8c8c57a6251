use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalyticsEventRow {
    pub id: Uuid,
    pub event_name: String,
    pub user_id: Option<Uuid>,
    pub properties: Value,
    pub created_at: DateTime<Utc>,
}
