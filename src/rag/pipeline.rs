//! Question answering over the vector store
//!
//! embed question -> similarity search -> fill template -> chat completion

use std::sync::Arc;
use tracing::debug;

use crate::cli::config::StoreConfig;
use crate::errors::{RagError, Result};
use crate::models::{ChatModel, EmbeddingModel};
use crate::rag::context::ContextBuilder;
use crate::rag::prompt::PromptTemplate;
use crate::store::{SearchHit, VectorStore};

/// Answer plus the chunks it was grounded on
#[derive(Debug, Clone)]
pub struct RagAnswer {
    /// Chat model reply, verbatim
    pub answer: String,
    /// Retrieved chunks in rank order
    pub sources: Vec<SearchHit>,
}

/// Stateless retrieval-augmented question handler
pub struct QueryHandler {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingModel>,
    chat: Arc<dyn ChatModel>,
    template: PromptTemplate,
    context_builder: ContextBuilder,
    top_k: usize,
    similarity_threshold: f64,
}

impl QueryHandler {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingModel>,
        chat: Arc<dyn ChatModel>,
        template: PromptTemplate,
    ) -> Self {
        let defaults = StoreConfig::default();
        Self {
            store,
            embedder,
            chat,
            template,
            context_builder: ContextBuilder::new(),
            top_k: defaults.top_k,
            similarity_threshold: defaults.similarity_threshold,
        }
    }

    /// Take top_k and threshold from store configuration
    pub fn with_search(mut self, config: &StoreConfig) -> Self {
        self.top_k = config.top_k;
        self.similarity_threshold = config.similarity_threshold;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Build the prompt for a question from already-retrieved hits
    pub fn build_prompt(&self, question: &str, hits: &[SearchHit]) -> String {
        let documents = self.context_builder.build(hits);
        self.template.render(&documents, question)
    }

    /// Answer one question
    pub async fn answer(&self, question: &str) -> Result<RagAnswer> {
        if question.trim().is_empty() {
            return Err(RagError::EmptyQuestion);
        }

        let embedding = self.embedder.embed_one(question).await?;
        let sources = self
            .store
            .similarity_search(&embedding, self.top_k, self.similarity_threshold)
            .await?;
        debug!(
            hits = sources.len(),
            best = sources.first().map(|h| h.score),
            "Retrieved context"
        );

        let prompt = self.build_prompt(question, &sources);
        let answer = self.chat.complete(&prompt).await?;

        Ok(RagAnswer { answer, sources })
    }
}
