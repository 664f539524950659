//! In-process vector store with brute-force cosine search

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{RagError, Result};
use crate::store::{cosine_similarity, EmbeddedChunk, SearchHit, VectorStore};

/// Vector store held entirely in memory
pub struct InMemoryVectorStore {
    dimensions: usize,
    chunks: RwLock<Vec<EmbeddedChunk>>,
}

impl InMemoryVectorStore {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            chunks: RwLock::new(Vec::new()),
        }
    }

    /// Configured embedding dimension
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn count(&self) -> Result<i64> {
        Ok(self.chunks.read().await.len() as i64)
    }

    async fn add(&self, chunks: &[EmbeddedChunk]) -> Result<()> {
        // Check everything before writing anything
        if let Some(bad) = chunks.iter().find(|c| c.embedding.len() != self.dimensions) {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: bad.embedding.len(),
            });
        }

        self.chunks.write().await.extend_from_slice(chunks);
        Ok(())
    }

    async fn similarity_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        threshold: f64,
    ) -> Result<Vec<SearchHit>> {
        if embedding.len() != self.dimensions {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }

        let chunks = self.chunks.read().await;
        let mut hits: Vec<SearchHit> = chunks
            .iter()
            .map(|chunk| SearchHit {
                document: chunk.document.clone(),
                score: cosine_similarity(embedding, &chunk.embedding),
            })
            .filter(|hit| f64::from(hit.score) >= threshold)
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        Ok(hits)
    }
}
