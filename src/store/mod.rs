//! Vector store for embedded document chunks
//!
//! - [`PgVectorStore`]: PostgreSQL table with a pgvector HNSW index
//! - [`InMemoryVectorStore`]: brute-force cosine search, no persistence

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::cli::Config;
use crate::errors::{RagError, Result};

pub use self::memory::InMemoryVectorStore;
pub use self::postgres::PgVectorStore;

/// A span of text with metadata (a PDF page or a chunk of one)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub content: String,
    pub metadata: HashMap<String, JsonValue>,
}

impl Document {
    /// Create a document with a fresh id and no metadata
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Builder-style metadata insertion
    pub fn with_metadata(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Page number recorded at ingestion, if any
    pub fn page_number(&self) -> Option<u64> {
        self.metadata.get("page_number").and_then(|v| v.as_u64())
    }
}

/// A chunk ready to be written: document plus its embedding
#[derive(Debug, Clone)]
pub struct EmbeddedChunk {
    pub document: Document,
    pub embedding: Vec<f32>,
}

/// A similarity search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub document: Document,
    /// Cosine similarity (1 - cosine distance)
    pub score: f32,
}

/// Persistent chunk storage with nearest-neighbour lookup
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Number of stored chunks
    async fn count(&self) -> Result<i64>;

    /// Write chunks; a failed call writes nothing
    async fn add(&self, chunks: &[EmbeddedChunk]) -> Result<()>;

    /// Top `top_k` chunks with similarity >= `threshold`, best first
    async fn similarity_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        threshold: f64,
    ) -> Result<Vec<SearchHit>>;
}

/// Open the store selected by `store.backend`
pub async fn open(config: &Config) -> Result<Arc<dyn VectorStore>> {
    match config.store.backend.as_str() {
        "pgvector" => {
            let store = PgVectorStore::connect(&config.database, &config.store).await?;
            if config.database.initialize_schema {
                store.initialize_schema().await?;
            }
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(InMemoryVectorStore::new(config.store.dimensions))),
        other => Err(RagError::ConfigError(format!("Unknown store backend: {}", other))),
    }
}

/// Cosine similarity; zero when either vector has no magnitude
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
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
