//! PostgreSQL + pgvector store
//!
//! One table per store: `id uuid, content text, metadata jsonb,
//! embedding vector(N)` with an HNSW index over cosine distance. The
//! schema script lives in `resources/schema.sql`.

use ::pgvector::Vector;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::Row;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cli::config::{DatabaseConfig, StoreConfig};
use crate::errors::{RagError, Result};
use crate::store::{Document, EmbeddedChunk, SearchHit, VectorStore};

const SCHEMA_TEMPLATE: &str = include_str!("../../resources/schema.sql");

/// Vector store backed by a pgvector table
pub struct PgVectorStore {
    pool: PgPool,
    table: String,
    dimensions: usize,
}

impl PgVectorStore {
    /// Connect a pool to the configured database
    pub async fn connect(database: &DatabaseConfig, store: &StoreConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(database.max_connections)
            .connect(&database.url)
            .await?;

        info!(table = %store.table, "Connected to PostgreSQL");
        Ok(Self::with_pool(pool, &store.table, store.dimensions))
    }

    /// Wrap an existing pool
    pub fn with_pool(pool: PgPool, table: &str, dimensions: usize) -> Self {
        Self {
            pool,
            table: table.to_string(),
            dimensions,
        }
    }

    /// Schema script with table name and dimension filled in
    pub fn schema_sql(table: &str, dimensions: usize) -> String {
        SCHEMA_TEMPLATE
            .replace("{table}", table)
            .replace("{dimensions}", &dimensions.to_string())
    }

    /// Create the extension, table and index if missing
    pub async fn initialize_schema(&self) -> Result<()> {
        let sql = Self::schema_sql(&self.table, self.dimensions);
        sqlx::raw_sql(&sql).execute(&self.pool).await?;
        debug!(table = %self.table, dimensions = self.dimensions, "Schema initialized");
        Ok(())
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn count(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let count = sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn add(&self, chunks: &[EmbeddedChunk]) -> Result<()> {
        if let Some(bad) = chunks.iter().find(|c| c.embedding.len() != self.dimensions) {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: bad.embedding.len(),
            });
        }

        let sql = format!(
            "INSERT INTO {} (id, content, metadata, embedding) VALUES ($1, $2, $3, $4)",
            self.table
        );

        let mut tx = self.pool.begin().await?;
        for chunk in chunks {
            sqlx::query(&sql)
                .bind(chunk.document.id)
                .bind(&chunk.document.content)
                .bind(Json(&chunk.document.metadata))
                .bind(Vector::from(chunk.embedding.clone()))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        debug!(rows = chunks.len(), "Inserted chunks");
        Ok(())
    }

    async fn similarity_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        threshold: f64,
    ) -> Result<Vec<SearchHit>> {
        let sql = format!(
            "SELECT id, content, metadata, 1 - (embedding <=> $1) AS similarity \
             FROM {} \
             WHERE 1 - (embedding <=> $1) >= $2 \
             ORDER BY embedding <=> $1 \
             LIMIT $3",
            self.table
        );

        let rows = sqlx::query(&sql)
            .bind(Vector::from(embedding.to_vec()))
            .bind(threshold)
            .bind(top_k as i64)
            .fetch_all(&self.pool)
            .await?;

        let mut hits = Vec::with_capacity(rows.len());
        for row in rows {
            let metadata: Json<HashMap<String, JsonValue>> = row.try_get("metadata")?;
            let similarity: f64 = row.try_get("similarity")?;
            hits.push(SearchHit {
                document: Document {
                    id: row.try_get::<Uuid, _>("id")?,
                    content: row.try_get("content")?,
                    metadata: metadata.0,
                },
                score: similarity as f32,
            });
        }

        debug!(hits = hits.len(), top_k, "Similarity search complete");
        Ok(hits)
    }
}
