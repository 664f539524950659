//! Startup loader
//!
//! Runs on every boot. A store that already holds chunks is left alone;
//! an empty store gets the reference PDF read, chunked, embedded and
//! written in a single `add` call. Nothing is written until every chunk
//! has been embedded, so a failed run leaves the store empty.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::errors::{RagError, Result};
use crate::ingestion::chunker::Chunker;
use crate::ingestion::pdf::{PdfReader, BUILTIN_PDF_NAME};
use crate::models::EmbeddingModel;
use crate::store::{Document, EmbeddedChunk, VectorStore};

/// What a loader run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Store already populated; nothing written
    Skipped { existing: i64 },
    /// PDF ingested into an empty store
    Loaded { pages: usize, chunks: usize },
}

/// Where the reference PDF comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfSource {
    /// Document compiled into the binary
    Builtin,
    /// Override from `ingest.pdf_path`
    File(PathBuf),
}

impl PdfSource {
    fn read(&self) -> Result<Vec<Document>> {
        match self {
            PdfSource::Builtin => PdfReader::read_builtin(),
            PdfSource::File(path) => PdfReader::read_file(path),
        }
    }

    fn describe(&self) -> String {
        match self {
            PdfSource::Builtin => format!("builtin {}", BUILTIN_PDF_NAME),
            PdfSource::File(path) => path.display().to_string(),
        }
    }
}

/// Populates an empty store from the reference PDF
pub struct StartupLoader {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingModel>,
    chunker: Arc<dyn Chunker>,
    source: PdfSource,
    batch_size: usize,
}

impl StartupLoader {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingModel>,
        chunker: Arc<dyn Chunker>,
        source: PdfSource,
    ) -> Self {
        Self {
            store,
            embedder,
            chunker,
            source,
            batch_size: 64,
        }
    }

    /// Set how many chunks go into one embedding request
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Load the PDF if the store is empty
    pub async fn run(&self) -> Result<LoadOutcome> {
        let existing = self.store.count().await?;
        if existing > 0 {
            info!(existing, "Vector store already populated, skipping ingestion");
            return Ok(LoadOutcome::Skipped { existing });
        }

        let source = self.source.describe();
        info!(%source, "Vector store empty, ingesting PDF");
        let pages = self.source.read()?;
        let documents = self.chunker.split(&pages);
        if documents.is_empty() {
            return Err(RagError::PdfError(format!(
                "{} produced no chunks",
                source
            )));
        }

        let expected = self.embedder.dimensions();
        let mut chunks = Vec::with_capacity(documents.len());
        for batch in documents.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|d| d.content.clone()).collect();
            let embeddings = self.embedder.embed(&texts).await?;
            if embeddings.len() != batch.len() {
                return Err(RagError::Generic(format!(
                    "Embedding model returned {} vectors for {} chunks",
                    embeddings.len(),
                    batch.len()
                )));
            }

            for (document, embedding) in batch.iter().zip(embeddings) {
                if embedding.len() != expected {
                    return Err(RagError::DimensionMismatch {
                        expected,
                        actual: embedding.len(),
                    });
                }
                chunks.push(EmbeddedChunk {
                    document: document.clone(),
                    embedding,
                });
            }
            info!(embedded = chunks.len(), total = documents.len(), "Embedding chunks");
        }

        self.store.add(&chunks).await?;
        info!(pages = pages.len(), chunks = chunks.len(), "Ingestion complete");

        Ok(LoadOutcome::Loaded {
            pages: pages.len(),
            chunks: chunks.len(),
        })
    }
}
