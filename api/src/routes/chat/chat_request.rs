use serde::{Deserialize, Serialize};

/// Form payload for POST /chat.
///
/// `userID` and `message` are validated by the route (missing and blank are
/// both rejected); `sessionID` is passed through untouched.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
    #[serde(rename = "sessionID")]
    pub session_id: Option<String>,
    pub message: Option<String>,
}

/// Success payload for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Generated reply text.
    pub response: String,
    /// Session identifier used for this turn; callers supply it back to
    /// continue the conversation.
    #[serde(rename = "sessionID")]
    pub session_id: String,
}

/// Validation failure payload, shape-frozen for clients.
#[derive(Debug, Serialize)]
pub struct ValidationError {
    pub error: &'static str,
}

impl ValidationError {
    pub const MISSING_FIELDS: Self = Self {
        error: "userID and message are required fields.",
    };
}
