//! POST /chat — answers one chat turn with RAG context and session history.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use chat_engine::{ChatBackend, ChatTurnRequest};

use crate::routes::chat::chat_request::{ChatForm, ChatResponse, ValidationError};

/// Handler: POST /chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/chat \
///   -d 'userID=u1' \
///   -d 'message=Where can I find a good view?'
/// ```
pub async fn chat(
    State(engine): State<Arc<dyn ChatBackend>>,
    Form(form): Form<ChatForm>,
) -> Response {
    let user_id = form.user_id.unwrap_or_default();
    let message = form.message.unwrap_or_default();

    if user_id.trim().is_empty() || message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ValidationError::MISSING_FIELDS),
        )
            .into_response();
    }

    debug!(
        user_id = %user_id,
        has_session = form.session_id.as_deref().is_some_and(|s| !s.is_empty()),
        "chat: start"
    );

    let result = engine
        .answer(ChatTurnRequest {
            user_id,
            session_id: form.session_id,
            message,
        })
        .await;

    match result {
        Ok(reply) => (
            StatusCode::OK,
            Json(ChatResponse {
                response: reply.response,
                session_id: reply.session_id,
            }),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "chat: engine failure");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
