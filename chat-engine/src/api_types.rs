//! Engine-level request/reply types.

use serde::Serialize;

/// One inbound chat turn, already past HTTP-level validation.
#[derive(Debug, Clone)]
pub struct ChatTurnRequest {
    /// Caller identity; combined with the session id into the history key.
    pub user_id: String,
    /// Session token from the caller; `None` or empty means "start fresh".
    pub session_id: Option<String>,
    /// The user's message for this turn.
    pub message: String,
}

/// The engine's answer for one turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    /// Generated reply text.
    pub response: String,
    /// Session identifier used for this turn, newly generated or echoed.
    pub session_id: String,
}
