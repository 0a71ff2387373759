//! Process-wide retrieval index over one fixed PDF document.
//!
//! Public API:
//! - [`DocumentIndex::build`]: extract text, split into overlapping chunks,
//!   embed every chunk, and assemble an immutable in-memory cosine index.
//! - [`DocumentIndex::search`]: find the k chunks most similar to a query.
//!
//! The index is built exactly once at startup; after that it is read-only
//! and safe to share across request handlers without locking.

mod config;
pub mod errors;
mod index;
mod loader;
mod splitter;

pub use config::IndexConfig;
pub use index::{ChunkHit, DocumentIndex, Embedder};
