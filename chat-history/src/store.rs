//! Redis-backed history store.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use crate::errors::HistoryError;
use crate::turn::Turn;

/// Namespace prefix for history keys, keeping them out of the way of any
/// other data living in the same Redis instance.
const KEY_PREFIX: &str = "chat:history:";

/// Handle to the history store.
///
/// Cheap to clone; the underlying [`ConnectionManager`] multiplexes one
/// connection and reconnects on its own.
#[derive(Clone)]
pub struct RedisHistory {
    manager: ConnectionManager,
}

impl RedisHistory {
    /// Opens the connection and verifies it with a PING.
    ///
    /// A failed PING is a startup error; the process must not serve
    /// requests against an unreachable store.
    ///
    /// # Errors
    /// [`HistoryError::Connect`] when the URL is rejected or the server is
    /// unreachable, [`HistoryError::Ping`] when the check comes back wrong.
    pub async fn connect(connection_string: &str) -> Result<Self, HistoryError> {
        let client = redis::Client::open(connection_string).map_err(HistoryError::Connect)?;
        let manager = client
            .get_connection_manager()
            .await
            .map_err(HistoryError::Connect)?;

        let store = Self { manager };
        store.ping().await?;

        info!(target: "chat_history::store", "connected to history store");
        Ok(store)
    }

    /// Round-trips a PING through the store.
    ///
    /// Used both by [`connect`](Self::connect) and by the health route.
    pub async fn ping(&self) -> Result<(), HistoryError> {
        let mut conn = self.manager.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| HistoryError::Ping(e.to_string()))?;
        if pong != "PONG" {
            return Err(HistoryError::Ping(format!("unexpected reply: {pong}")));
        }
        Ok(())
    }

    /// Appends one turn to the session's list.
    pub async fn append(&self, session_key: &str, turn: &Turn) -> Result<(), HistoryError> {
        let payload = serde_json::to_string(turn)?;
        let mut conn = self.manager.clone();
        let len: i64 = conn.rpush(storage_key(session_key), payload).await?;

        debug!(
            target: "chat_history::store",
            session_key,
            turns = len,
            "turn appended"
        );
        Ok(())
    }

    /// Lists all turns for the session in chronological order.
    ///
    /// Entries that fail to deserialize abort the read; the store is the
    /// only writer of these payloads, so a malformed entry means real
    /// corruption rather than something to paper over.
    pub async fn list(&self, session_key: &str) -> Result<Vec<Turn>, HistoryError> {
        let mut conn = self.manager.clone();
        let raw: Vec<String> = conn.lrange(storage_key(session_key), 0, -1).await?;

        raw.iter()
            .map(|entry| serde_json::from_str::<Turn>(entry).map_err(HistoryError::from))
            .collect()
    }
}

fn storage_key(session_key: &str) -> String {
    format!("{KEY_PREFIX}{session_key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(storage_key("u1_abc"), "chat:history:u1_abc");
    }
}
