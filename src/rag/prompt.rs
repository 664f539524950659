//! Prompt template with `{input}` and `{documents}` slots

use std::path::Path;

use crate::errors::{RagError, Result};

const INPUT_SLOT: &str = "{input}";
const DOCUMENTS_SLOT: &str = "{documents}";

const BUILTIN_TEMPLATE: &str = include_str!("../../resources/prompts/rag-prompt-template.st");

/// Validated prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Template bundled with the binary
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_TEMPLATE)
    }

    /// Load a template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RagError::PromptError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// Accept text only if both slots are present
    pub fn parse(text: &str) -> Result<Self> {
        for slot in [INPUT_SLOT, DOCUMENTS_SLOT] {
            if !text.contains(slot) {
                return Err(RagError::PromptError(format!(
                    "Template is missing the {} slot",
                    slot
                )));
            }
        }

        Ok(Self {
            text: text.to_string(),
        })
    }

    /// Fill both slots in one pass; slot markers inside the values stay literal
    pub fn render(&self, documents: &str, input: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + documents.len() + input.len());
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(DOCUMENTS_SLOT) {
                out.push_str(documents);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(INPUT_SLOT) {
                out.push_str(input);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }

        out.push_str(rest);
        out
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
