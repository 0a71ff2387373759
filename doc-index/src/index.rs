//! Immutable in-memory cosine index over embedded document chunks.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use llm_service::OpenAiService;

use crate::config::IndexConfig;
use crate::errors::DocIndexError;
use crate::loader::load_document_text;
use crate::splitter::split_overlapping;

/// Anything that can turn text into a semantic vector.
///
/// The production implementation is [`OpenAiService`]; tests substitute a
/// deterministic stub.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DocIndexError>;
}

#[async_trait]
impl Embedder for OpenAiService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DocIndexError> {
        Ok(OpenAiService::embed(self, text).await?)
    }
}

/// One retrieved chunk with its similarity score.
#[derive(Debug, Clone)]
pub struct ChunkHit {
    pub text: String,
    pub score: f32,
}

struct IndexedChunk {
    text: String,
    vector: Vec<f32>,
}

/// Read-only similarity index over the source document's chunks.
///
/// Built once at startup; holds the chunk vectors and the embedder handle
/// used to embed incoming queries with the same model.
pub struct DocumentIndex {
    chunks: Vec<IndexedChunk>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl DocumentIndex {
    /// Builds the index: extract text, split, embed every chunk.
    ///
    /// Fails fatally on an unreadable or empty document, on any embedding
    /// error, and on inconsistent vector dimensions. No partial index is
    /// ever returned.
    pub async fn build(
        cfg: &IndexConfig,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, DocIndexError> {
        cfg.validate()?;
        let text = load_document_text(&cfg.document_path)?;
        let pieces = split_overlapping(&text, cfg.chunk_size, cfg.chunk_overlap);

        let mut chunks = Vec::with_capacity(pieces.len());
        let mut expected_dim: Option<usize> = None;

        for piece in pieces {
            let vector = embedder.embed(&piece).await?;
            match expected_dim {
                None => expected_dim = Some(vector.len()),
                Some(expected) if vector.len() != expected => {
                    return Err(DocIndexError::DimensionMismatch {
                        got: vector.len(),
                        expected,
                    });
                }
                Some(_) => {}
            }
            chunks.push(IndexedChunk {
                text: piece,
                vector,
            });
        }

        info!(
            target: "doc_index::index",
            path = %cfg.document_path.display(),
            chunks = chunks.len(),
            dim = expected_dim.unwrap_or(0),
            "document index built"
        );

        Ok(Self {
            chunks,
            embedder,
            top_k: cfg.top_k,
        })
    }

    /// Finds the `k` chunks most similar to `query`, best first.
    ///
    /// Ties are broken by chunk order, so repeated searches over the same
    /// index with the same query return the same hits in the same order.
    /// An empty index yields no hits.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ChunkHit>, DocIndexError> {
        if self.chunks.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vec = self.embedder.embed(query).await?;

        let mut scored: Vec<(usize, f32)> = self
            .chunks
            .iter()
            .enumerate()
            .map(|(i, c)| (i, cosine_similarity(&query_vec, &c.vector)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| ChunkHit {
                text: self.chunks[i].text.clone(),
                score,
            })
            .collect())
    }

    /// Default-k search, using the configured `top_k`.
    pub async fn search_default(&self, query: &str) -> Result<Vec<ChunkHit>, DocIndexError> {
        self.search(query, self.top_k).await
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when the document produced no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Cosine similarity of two vectors; 0.0 when either norm vanishes or the
/// dimensions disagree.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
