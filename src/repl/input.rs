//! Input handler for the shell using rustyline
//!
//! Line editing with persistent history

use rustyline::error::ReadlineError;
use rustyline::history::{History, SearchDirection};
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::warn;

use crate::errors::Result;

/// One read from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A trimmed line (possibly empty)
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D
    Eof,
}

/// Readline interface with optional on-disk history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    pub fn new(prompt: impl Into<String>) -> Result<Self> {
        Ok(InputHandler {
            editor: DefaultEditor::new()?,
            history_path: None,
            prompt: prompt.into(),
        })
    }

    /// Create input handler that loads and saves `history_file`
    pub fn with_history(prompt: impl Into<String>, history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            if let Err(e) = editor.load_history(&history_file) {
                warn!(path = %history_file.display(), "Could not load history: {}", e);
            }
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
            prompt: prompt.into(),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Read a line of input from the user
    pub fn read_line(&mut self) -> Result<InputEvent> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    self.editor.add_history_entry(trimmed)?;
                }
                Ok(InputEvent::Line(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(err) => Err(err.into()),
        }
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            self.editor.save_history(path)?;
        }
        Ok(())
    }

    /// Last `limit` history entries, oldest first
    pub fn recent_history(&self, limit: usize) -> Result<Vec<String>> {
        let history = self.editor.history();
        let start = history.len().saturating_sub(limit);

        let mut entries = Vec::with_capacity(history.len() - start);
        for index in start..history.len() {
            if let Some(result) = history.get(index, SearchDirection::Forward)? {
                entries.push(result.entry.into_owned());
            }
        }
        Ok(entries)
    }

    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }

    #[cfg(test)]
    fn push_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_prompt() {
        let handler = InputHandler::new("test> ").unwrap();
        assert_eq!(handler.prompt(), "test> ");
        assert!(handler.history_path.is_none());
    }

    #[test]
    fn test_history_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("history");

        {
            let mut handler = InputHandler::with_history("> ", history_path.clone()).unwrap();
            handler.push_history("q what is pgvector");
            handler.push_history("status");
            handler.save_history().unwrap();
        }

        assert!(history_path.exists());

        let handler = InputHandler::with_history("> ", history_path).unwrap();
        assert_eq!(handler.history_len(), 2);
    }

    #[test]
    fn test_recent_history_limit() {
        let mut handler = InputHandler::new("> ").unwrap();
        for line in ["help", "status", "q one", "q two"] {
            handler.push_history(line);
        }

        assert_eq!(handler.recent_history(2).unwrap(), vec!["q one", "q two"]);
        assert_eq!(handler.recent_history(10).unwrap().len(), 4);
        assert!(handler.recent_history(0).unwrap().is_empty());
    }
}
