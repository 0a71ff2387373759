//! Configuration layer: reads index settings from environment variables.

use std::path::PathBuf;

use crate::errors::DocIndexError;

/// Settings for building and querying the document index.
///
/// The document path and chunking parameters are fixed per process; nothing
/// here is request-configurable.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Path to the source PDF document.
    pub document_path: PathBuf,
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub chunk_overlap: usize,
    /// Default number of chunks returned by a search.
    pub top_k: usize,
}

impl IndexConfig {
    /// Build from environment variables.
    ///
    /// `DOCUMENT_PATH` is required; `CHUNK_SIZE` (200), `CHUNK_OVERLAP` (30),
    /// and `RAG_TOP_K` (4) fall back to their defaults when unset.
    ///
    /// # Errors
    /// [`DocIndexError::MissingEnv`] when `DOCUMENT_PATH` is absent, and
    /// [`DocIndexError::BadChunking`] when the overlap is not smaller than
    /// the chunk size.
    pub fn from_env() -> Result<Self, DocIndexError> {
        let document_path = std::env::var("DOCUMENT_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(DocIndexError::MissingEnv("DOCUMENT_PATH"))?;

        let cfg = Self {
            document_path,
            chunk_size: parse("CHUNK_SIZE", 200),
            chunk_overlap: parse("CHUNK_OVERLAP", 30),
            top_k: parse("RAG_TOP_K", 4),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub(crate) fn validate(&self) -> Result<(), DocIndexError> {
        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size {
            return Err(DocIndexError::BadChunking {
                size: self.chunk_size,
                overlap: self.chunk_overlap,
            });
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_overlap_not_smaller_than_size() {
        let cfg = IndexConfig {
            document_path: PathBuf::from("doc.pdf"),
            chunk_size: 30,
            chunk_overlap: 30,
            top_k: 4,
        };
        assert!(matches!(
            cfg.validate(),
            Err(DocIndexError::BadChunking { .. })
        ));
    }

    #[test]
    fn validate_accepts_default_parameters() {
        let cfg = IndexConfig {
            document_path: PathBuf::from("doc.pdf"),
            chunk_size: 200,
            chunk_overlap: 30,
            top_k: 4,
        };
        assert!(cfg.validate().is_ok());
    }
}
