pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::enhancement::handlers as enhancement;
use crate::feedback::handlers as feedback;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Enhancement API
        .route("/api/v1/models", get(enhancement::handle_list_models))
        .route("/api/v1/enhance", post(enhancement::handle_enhance))
        .route("/api/v1/expand", post(enhancement::handle_expand))
        .route("/api/v1/condense", post(enhancement::handle_condense))
        .route("/api/v1/prompts", get(enhancement::handle_history))
        .route("/api/v1/prompts/:id", get(enhancement::handle_get_prompt))
        // Feedback API
        .route("/api/v1/feedback", post(feedback::handle_submit_feedback))
        // Admin dashboard API
        .route("/api/v1/admin/stats", get(admin::handle_admin_stats))
        .route("/api/v1/admin/events", get(admin::handle_admin_events))
        .with_state(state)
}
