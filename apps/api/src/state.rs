use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::llm_client::CompletionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Completion backend. `LlmClient` in production, stubs in router tests.
    pub llm: Arc<dyn CompletionService>,
    pub config: Config,
}
