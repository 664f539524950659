//! ragshell - question answering over a reference PDF
//!
//! On startup the PDF is chunked, embedded and written to a pgvector
//! table (once; later boots find the table populated and skip it). The
//! shell then answers `q` questions by retrieving the closest chunks and
//! asking a hosted chat model with those chunks as context.
//!
//! # Architecture
//!
//! - **ingestion**: PDF reading, token-bounded chunking, startup loader
//! - **store**: `VectorStore` trait with pgvector and in-memory backends
//! - **models**: embedding and chat seams over an OpenAI-compatible API
//! - **rag**: prompt template and query handler
//! - **repl**: interactive shell

pub mod errors;
pub use errors::{RagError, Result};

pub mod bootstrap;
pub mod cli;
pub mod ingestion;
pub mod models;
pub mod rag;
pub mod repl;
pub mod store;
pub mod telemetry;
