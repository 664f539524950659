// Context assembly for the {documents} slot
use crate::store::SearchHit;

/// Separator placed between retrieved chunks
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Builds the documents section of a prompt from search hits
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder;

impl ContextBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Join hit contents in rank order, separated by blank lines
    pub fn build(&self, hits: &[SearchHit]) -> String {
        hits.iter()
            .map(|hit| hit.document.content.trim())
            .filter(|content| !content.is_empty())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR)
    }
}
