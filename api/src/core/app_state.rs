use std::sync::Arc;

use axum::extract::FromRef;

use chat_engine::ChatBackend;
use chat_history::RedisHistory;
use llm_service::OpenAiService;

/// Shared state for all HTTP handlers.
///
/// Every field is an immutable handle constructed at startup; handlers hold
/// clones and never mutate shared in-process state.
#[derive(Clone)]
pub struct AppState {
    /// The chat engine behind `/chat`.
    pub engine: Arc<dyn ChatBackend>,
    /// Collaborator handles probed by `/health`.
    pub health: Arc<HealthState>,
}

/// Handles the health route reports on.
pub struct HealthState {
    /// Chat-profile LLM client (probed via `GET /v1/models`).
    pub chat_llm: Arc<OpenAiService>,
    /// History store (probed via PING).
    pub history: RedisHistory,
}

impl FromRef<AppState> for Arc<dyn ChatBackend> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.engine)
    }
}

impl FromRef<AppState> for Arc<HealthState> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.health)
    }
}
