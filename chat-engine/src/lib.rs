//! Chat request engine: session resolution, history formatting, context
//! retrieval, prompt assembly, model invocation, and history persistence.
//!
//! The engine is stateless across requests; everything it touches comes in
//! as an explicitly constructed, immutable service handle. The seams are
//! the [`ContextRetriever`], [`TurnStore`], and [`ChatModel`] traits, with
//! production implementations provided for the concrete `doc-index`,
//! `chat-history`, and `llm-service` types.

mod api_types;
mod engine;
mod error;
mod ports;
mod prompt;
mod session;

pub use api_types::{ChatReply, ChatTurnRequest};
pub use engine::{ChatBackend, ChatEngine};
pub use error::ChatEngineError;
pub use ports::{ChatModel, ContextRetriever, TurnStore};
