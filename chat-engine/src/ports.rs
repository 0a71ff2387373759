//! Seam traits between the engine and its collaborators, plus the
//! production implementations over the concrete service crates.

use async_trait::async_trait;

use chat_history::{RedisHistory, Turn};
use doc_index::DocumentIndex;
use llm_service::OpenAiService;

use crate::error::ChatEngineError;

/// Finds document chunks semantically similar to a query.
///
/// Returns chunk texts in retrieval order; an empty vec means "no context".
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<String>, ChatEngineError>;
}

/// Append-only, chronologically ordered turn storage per session key.
#[async_trait]
pub trait TurnStore: Send + Sync {
    async fn append(&self, session_key: &str, turn: &Turn) -> Result<(), ChatEngineError>;
    async fn list(&self, session_key: &str) -> Result<Vec<Turn>, ChatEngineError>;
}

/// Generates a reply for an assembled prompt.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ChatEngineError>;
}

#[async_trait]
impl ContextRetriever for DocumentIndex {
    async fn retrieve(&self, query: &str) -> Result<Vec<String>, ChatEngineError> {
        let hits = self.search_default(query).await?;
        Ok(hits.into_iter().map(|h| h.text).collect())
    }
}

#[async_trait]
impl TurnStore for RedisHistory {
    async fn append(&self, session_key: &str, turn: &Turn) -> Result<(), ChatEngineError> {
        Ok(RedisHistory::append(self, session_key, turn).await?)
    }

    async fn list(&self, session_key: &str) -> Result<Vec<Turn>, ChatEngineError> {
        Ok(RedisHistory::list(self, session_key).await?)
    }
}

#[async_trait]
impl ChatModel for OpenAiService {
    async fn generate(&self, prompt: &str) -> Result<String, ChatEngineError> {
        Ok(OpenAiService::generate(self, prompt).await?)
    }
}
