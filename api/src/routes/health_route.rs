//! GET /health — best-effort snapshot of the backend's collaborators.

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use llm_service::health_service::{self, HealthStatus};

use crate::core::app_state::HealthState;

const PROBE_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize)]
struct HealthReport {
    llm: HealthStatus,
    history: HistoryHealth,
}

#[derive(Serialize)]
struct HistoryHealth {
    ok: bool,
    message: String,
}

/// Handler: GET /health
///
/// Always answers 200; individual collaborator failures show up as
/// `ok=false` entries rather than an error status.
pub async fn health(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let llm = health_service::check(&state.chat_llm, PROBE_TIMEOUT_SECS).await;

    let history = match state.history.ping().await {
        Ok(()) => HistoryHealth {
            ok: true,
            message: "PONG".to_string(),
        },
        Err(e) => HistoryHealth {
            ok: false,
            message: e.to_string(),
        },
    };

    Json(HealthReport { llm, history })
}
