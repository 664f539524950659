// Retrieval-augmented answering
//
// Components:
// - Prompt: template with {input} and {documents} slots
// - Context Builder: retrieved chunks to prompt text
// - Pipeline: embed, search, fill, complete

pub mod context;
pub mod pipeline;
pub mod prompt;

pub use context::ContextBuilder;
pub use pipeline::{QueryHandler, RagAnswer};
pub use prompt::PromptTemplate;
