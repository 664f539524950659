//! Wire types for the OpenAI-compatible HTTP API
//!
//! Only the fields ragshell reads or sends are modelled; unknown fields
//! in responses are ignored.

use serde::{Deserialize, Serialize};

/// Request body for `POST /embeddings`
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a [String],
}

/// Response body from `POST /embeddings`
#[derive(Debug, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One embedding in an [`EmbeddingResponse`]
#[derive(Debug, Deserialize)]
pub struct EmbeddingData {
    /// Position of the matching input
    pub index: usize,
    pub embedding: Vec<f32>,
}

/// Chat message role; ragshell only ever sends user turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A single outgoing chat message
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Option<String>,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
        }
    }
}

/// Request body for `POST /chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub stream: bool,
}

/// Response body from `POST /chat/completions`
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ReplyMessage,
    /// `stop`, or `length` when the reply hit the token limit
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant reply inside a [`ChatChoice`]
#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Error envelope: `{"error": {"message": "..."}}`
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
