//! Typed error for the chat-engine crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatEngineError {
    /// Errors from the document index (query embedding or search).
    #[error("context retrieval failed: {0}")]
    Index(#[from] doc_index::errors::DocIndexError),

    /// Errors from the history store.
    #[error("history store failed: {0}")]
    History(#[from] chat_history::errors::HistoryError),

    /// Errors from the language-model service.
    #[error("model invocation failed: {0}")]
    Llm(#[from] llm_service::error_handler::LlmError),
}
