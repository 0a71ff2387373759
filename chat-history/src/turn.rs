//! Conversation turn shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Originating role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message exchanged in a conversation.
///
/// Ordering within a session relies on list position in the store, not on
/// `created_at`; the timestamp is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Builds a turn stamped with the current time.
    pub fn now(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}
