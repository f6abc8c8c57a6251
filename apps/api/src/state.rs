use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::enhancement::orchestrator::EnhancementOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The one enhancement pipeline; every enhance/expand/condense call goes through it.
    pub enhancer: Arc<EnhancementOrchestrator>,
    pub config: Config,
}
