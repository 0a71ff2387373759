//! Typed error for the doc-index crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocIndexError {
    /// Document file could not be read or parsed.
    #[error("failed to extract text from {path}: {reason}")]
    Extract { path: PathBuf, reason: String },

    /// Document parsed but contained no usable text.
    #[error("document {0} contains no extractable text")]
    EmptyDocument(PathBuf),

    /// Chunking parameters cannot make progress.
    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({size})")]
    BadChunking { size: usize, overlap: usize },

    /// Errors from the embedding service.
    #[error("embedding failed: {0}")]
    Embedding(#[from] llm_service::error_handler::LlmError),

    /// Chunk vectors did not all share one dimension.
    #[error("embedding dimension mismatch: got {got}, expected {expected}")]
    DimensionMismatch { got: usize, expected: usize },

    /// Missing required environment variable.
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),
}
