use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::admin::auth::authorize_admin;
use crate::admin::stats::{compute_admin_stats, recent_events, AdminStats};
use crate::enhancement::history::clamp_limit;
use crate::errors::AppError;
use crate::models::analytics::AnalyticsEventRow;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EventsQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/admin/stats
pub async fn handle_admin_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminStats>, AppError> {
    authorize_admin(state.config.admin_token.as_deref(), &headers)?;
    let stats = compute_admin_stats(&state.db)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(stats))
}

/// GET /api/v1/admin/events?limit=
pub async fn handle_admin_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<EventsQuery>,
) -> Result<Json<Vec<AnalyticsEventRow>>, AppError> {
    authorize_admin(state.config.admin_token.as_deref(), &headers)?;
    let events = recent_events(&state.db, clamp_limit(params.limit))
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(events))
}
