//! Typed error for the chat-history crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// Connection string rejected or the server is unreachable.
    #[error("failed to connect to history store: {0}")]
    Connect(#[source] redis::RedisError),

    /// The startup PING did not come back clean.
    #[error("history store connectivity check failed: {0}")]
    Ping(String),

    /// Command-level Redis failures (reads and writes).
    #[error("history store error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A stored turn could not be (de)serialized.
    #[error("turn (de)serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
