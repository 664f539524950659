//! Token-bounded chunking
//!
//! Splitting is delegated to `text-splitter`, sized by a `tokenizers`
//! tokenizer so the budget counts model tokens rather than characters.

use std::path::Path;
use text_splitter::{ChunkConfig, ChunkSizer, TextSplitter};
use tokenizers::Tokenizer;
use tracing::debug;

use crate::cli::config::IngestConfig;
use crate::errors::{RagError, Result};
use crate::store::Document;

/// Splits page documents into chunk documents
pub trait Chunker: Send + Sync {
    fn split(&self, pages: &[Document]) -> Vec<Document>;
}

/// Chunker with a fixed token budget per chunk
pub struct TokenChunker<S: ChunkSizer> {
    splitter: TextSplitter<S>,
    max_tokens: usize,
    min_chunk_chars: usize,
}

impl<S: ChunkSizer> TokenChunker<S> {
    /// Create a chunker measuring chunks with `sizer`
    pub fn with_sizer(sizer: S, max_tokens: usize, min_chunk_chars: usize) -> Self {
        Self {
            splitter: TextSplitter::new(ChunkConfig::new(max_tokens).with_sizer(sizer)),
            max_tokens,
            min_chunk_chars,
        }
    }

    /// Token budget per chunk
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Split raw text, dropping chunks shorter than the minimum
    pub fn split_text<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.splitter
            .chunks(text)
            .map(str::trim)
            .filter(|chunk| chunk.chars().count() >= self.min_chunk_chars.max(1))
            .collect()
    }
}

impl TokenChunker<Tokenizer> {
    /// Build from config, loading the tokenizer from a file or the HF hub
    pub fn from_config(config: &IngestConfig) -> Result<Self> {
        let tokenizer = load_tokenizer(&config.tokenizer)?;
        Ok(Self::with_sizer(tokenizer, config.chunk_size, config.min_chunk_chars))
    }
}

impl<S: ChunkSizer + Send + Sync> Chunker for TokenChunker<S> {
    fn split(&self, pages: &[Document]) -> Vec<Document> {
        let mut chunks = Vec::new();

        for page in pages {
            for text in self.split_text(&page.content) {
                let mut chunk = Document::new(text);
                chunk.metadata = page.metadata.clone();
                chunk
                    .metadata
                    .insert("chunk_index".to_string(), chunks.len().into());
                chunks.push(chunk);
            }
        }

        debug!(pages = pages.len(), chunks = chunks.len(), max_tokens = self.max_tokens, "Split pages");
        chunks
    }
}

/// Load a tokenizer from a local `tokenizer.json` or a Hugging Face hub id
pub fn load_tokenizer(source: &str) -> Result<Tokenizer> {
    let path = Path::new(source);
    if path.exists() {
        return Tokenizer::from_file(path)
            .map_err(|e| RagError::TokenizerError(format!("Failed to load {}: {}", source, e)));
    }

    Tokenizer::from_pretrained(source, None)
        .map_err(|e| RagError::TokenizerError(format!("Failed to fetch {}: {}", source, e)))
}
