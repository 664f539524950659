//! Document ingestion: PDF pages to embedded chunks

pub mod chunker;
pub mod loader;
pub mod pdf;

pub use chunker::{load_tokenizer, Chunker, TokenChunker};
pub use loader::{LoadOutcome, PdfSource, StartupLoader};
pub use pdf::{PdfReader, BUILTIN_PDF};
