//! Hosted model access
//!
//! Two seams, both implemented by [`OpenAiClient`]:
//! - [`EmbeddingModel`]: text to fixed-length vectors
//! - [`ChatModel`]: filled prompt to answer text

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::errors::{RagError, Result};

pub use client::OpenAiClient;

/// Produces embedding vectors for text
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed a batch, one vector per input in input order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Length of every vector this model returns
    fn dimensions(&self) -> usize;

    /// Embed a single text
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| RagError::Generic("Embedding model returned no vector".to_string()))
    }
}

/// Generates text from a prompt
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one prompt and return the reply verbatim
    async fn complete(&self, prompt: &str) -> Result<String>;
}
