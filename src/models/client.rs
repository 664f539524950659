//! OpenAI-compatible HTTP client
//!
//! Provides embeddings and chat completions:
//! - Endpoints: POST /embeddings, POST /chat/completions
//! - Bearer authentication
//! - No retry or backoff: failures surface to the caller

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cli::config::{OpenAiConfig, StoreConfig};
use crate::errors::{RagError, Result};
use crate::models::types::{
    ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse, EmbeddingRequest, EmbeddingResponse,
};
use crate::models::{ChatModel, EmbeddingModel};

/// Client for an OpenAI-compatible API
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    embedding_model: String,
    temperature: f32,
    dimensions: usize,
}

impl OpenAiClient {
    /// Create a client from configuration and a resolved API key
    pub fn new(config: &OpenAiConfig, store: &StoreConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(RagError::HttpError)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            chat_model: config.chat_model.clone(),
            embedding_model: config.embedding_model.clone(),
            temperature: config.temperature,
            dimensions: store.dimensions,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get chat model name
    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(RagError::ApiError {
                status,
                message: api_error_message(&text),
            });
        }

        Ok(response)
    }
}

/// Extract the provider's error message, falling back to the raw body
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Put embeddings back in input order and check the count
fn order_embeddings(response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
    if response.data.len() != expected {
        return Err(RagError::Generic(format!(
            "Embedding response held {} vectors for {} inputs",
            response.data.len(),
            expected
        )));
    }

    let mut data = response.data;
    data.sort_by_key(|d| d.index);
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

#[async_trait]
impl EmbeddingModel for OpenAiClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: texts,
        };
        let response: EmbeddingResponse = self.post("/embeddings", &request).await?.json().await?;
        if let Some(usage) = response.usage {
            debug!(inputs = texts.len(), tokens = usage.total_tokens, "Embedded batch");
        }

        order_embeddings(response, texts.len())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.chat_model,
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.temperature,
            stream: false,
        };
        let response: ChatResponse = self.post("/chat/completions", &request).await?.json().await?;
        if let Some(usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion"
            );
        }

        reply_content(response)
    }
}

/// Take the first choice's text, warning when it was cut off
fn reply_content(response: ChatResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| RagError::Generic("Chat completion returned no choices".to_string()))?;

    if choice.finish_reason.as_deref() == Some("length") {
        warn!("Chat completion stopped at the token limit; answer is truncated");
    }

    choice
        .message
        .content
        .ok_or_else(|| RagError::Generic("Chat completion returned no content".to_string()))
}
