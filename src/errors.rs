//! Error types for ragshell
//!
//! Every fallible library operation returns [`Result`]. Nothing here is
//! retried: an error ends the startup sequence or the current query.

use thiserror::Error;

/// Main error type for ingestion, retrieval and generation
#[derive(Error, Debug)]
pub enum RagError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// PDF could not be read or held no text
    #[error("PDF error: {0}")]
    PdfError(String),

    /// Tokenizer loading errors
    #[error("Tokenizer error: {0}")]
    TokenizerError(String),

    /// Prompt template errors
    #[error("Prompt template error: {0}")]
    PromptError(String),

    /// Hosted model API returned a non-success status
    #[error("Model API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Embedding length differs from the configured store dimension
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Question was blank
    #[error("Question must not be empty")]
    EmptyQuestion,

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    ReadlineError(#[from] rustyline::error::ReadlineError),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for ragshell operations
pub type Result<T> = std::result::Result<T, RagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = RagError::ApiError {
            status: 429,
            message: "Rate limit reached".to_string(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Rate limit"));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = RagError::DimensionMismatch {
            expected: 1536,
            actual: 768,
        };
        assert!(err.to_string().contains("1536"));
        assert!(err.to_string().contains("768"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.pdf");
        let err: RagError = io.into();
        assert!(matches!(err, RagError::IoError(_)));
    }
}
