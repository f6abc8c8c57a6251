//! Best-effort downstream writes for successful enhancements.
//!
//! Both sinks are append-only: concurrent requests may write in any order and
//! nothing is ever updated in place. The orchestrator logs and swallows their
//! failures.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::enhancement::models::OperationKind;

/// A successful enhancement, as written to `enhanced_prompts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedPromptRecord {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub original_prompt: String,
    pub enhanced_prompt: String,
    pub model_used: String,
    pub operation: OperationKind,
}

#[async_trait]
pub trait PromptStore: Send + Sync {
    async fn append(&self, record: &EnhancedPromptRecord) -> Result<()>;
}

#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record(
        &self,
        event_name: &str,
        user_id: Option<Uuid>,
        fields: Map<String, Value>,
    ) -> Result<()>;
}

/// `PromptStore` backed by the `enhanced_prompts` table.
#[derive(Clone)]
pub struct PgPromptStore {
    pool: PgPool,
}

impl PgPromptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromptStore for PgPromptStore {
    async fn append(&self, record: &EnhancedPromptRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO enhanced_prompts
                (id, user_id, original_prompt, enhanced_prompt, model_used, operation)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.original_prompt)
        .bind(&record.enhanced_prompt)
        .bind(&record.model_used)
        .bind(record.operation.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// `AnalyticsSink` backed by the `analytics_events` table.
#[derive(Clone)]
pub struct PgAnalyticsSink {
    pool: PgPool,
}

impl PgAnalyticsSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsSink for PgAnalyticsSink {
    async fn record(
        &self,
        event_name: &str,
        user_id: Option<Uuid>,
        fields: Map<String, Value>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO analytics_events (event_name, user_id, properties) VALUES ($1, $2, $3)",
        )
        .bind(event_name)
        .bind(user_id)
        .bind(Value::Object(fields))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
