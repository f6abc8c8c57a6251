use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

use crate::enhancement::orchestrator::ENHANCED_EVENT;
use crate::models::analytics::AnalyticsEventRow;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelUsage {
    pub model: String,
    pub count: i64,
    /// Share of all successful enhancements, 0.0 – 1.0.
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    pub total_enhancements: i64,
    pub unique_users: i64,
    pub avg_elapsed_ms: Option<f64>,
    /// Mean of enhanced_length / original_length.
    pub avg_length_ratio: Option<f64>,
    pub model_usage: Vec<ModelUsage>,
    pub feedback_count: i64,
    pub avg_rating: Option<f64>,
}

/// Aggregates dashboard statistics from `analytics_events` and `feedback`.
pub async fn compute_admin_stats(pool: &PgPool) -> Result<AdminStats> {
    let (total_enhancements, unique_users, avg_elapsed_ms, avg_length_ratio): (
        i64,
        i64,
        Option<f64>,
        Option<f64>,
    ) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COUNT(DISTINCT user_id),
            AVG((properties->>'elapsed_ms')::float8),
            AVG((properties->>'enhanced_length')::float8
                / NULLIF((properties->>'original_length')::float8, 0))
        FROM analytics_events
        WHERE event_name = $1
        "#,
    )
    .bind(ENHANCED_EVENT)
    .fetch_one(pool)
    .await?;

    let per_model: Vec<(Option<String>, i64)> = sqlx::query_as(
        r#"
        SELECT properties->>'model_used', COUNT(*)
        FROM analytics_events
        WHERE event_name = $1
        GROUP BY 1
        ORDER BY 2 DESC
        "#,
    )
    .bind(ENHANCED_EVENT)
    .fetch_all(pool)
    .await?;

    let (feedback_count, avg_rating): (i64, Option<f64>) =
        sqlx::query_as("SELECT COUNT(*), AVG(rating::float8) FROM feedback")
            .fetch_one(pool)
            .await?;

    Ok(AdminStats {
        total_enhancements,
        unique_users,
        avg_elapsed_ms,
        avg_length_ratio,
        model_usage: model_usage(per_model),
        feedback_count,
        avg_rating,
    })
}

/// Returns the most recent analytics events of any kind.
pub async fn recent_events(pool: &PgPool, limit: i64) -> Result<Vec<AnalyticsEventRow>> {
    Ok(sqlx::query_as::<_, AnalyticsEventRow>(
        r#"
        SELECT id, event_name, user_id, properties, created_at
        FROM analytics_events
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

/// Turns raw per-model counts into usage shares. Events without a model
/// name are reported as "unknown".
fn model_usage(rows: Vec<(Option<String>, i64)>) -> Vec<ModelUsage> {
    let total: i64 = rows.iter().map(|(_, count)| count).sum();
    rows.into_iter()
        .map(|(model, count)| ModelUsage {
            model: model.unwrap_or_else(|| "unknown".to_string()),
            count,
            share: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            },
        })
        .collect()
}
