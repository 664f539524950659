//! Interactive shell
//!
//! Reads commands with rustyline, answers `q` questions through the
//! [`QueryHandler`] and keeps going after a failed query. One command
//! runs at a time.

pub mod commands;
pub mod display;
pub mod input;

use std::sync::Arc;

use crate::cli::config::ShellConfig;
use crate::cli::Config;
use crate::errors::Result;
use crate::rag::QueryHandler;
use crate::store::VectorStore;

pub use crate::repl::commands::Command;
pub use crate::repl::display::DisplayManager;
use crate::repl::commands::DEFAULT_HISTORY_LIMIT;
use crate::repl::input::{InputEvent, InputHandler};

/// Shell session
pub struct Shell {
    handler: Arc<QueryHandler>,
    store: Arc<dyn VectorStore>,
    input: InputHandler,
    display: DisplayManager,
    backend: String,
    show_sources: bool,
}

impl Shell {
    /// Create a shell with persistent history from configuration
    pub fn new(
        handler: Arc<QueryHandler>,
        store: Arc<dyn VectorStore>,
        config: &Config,
        show_sources: bool,
    ) -> Result<Self> {
        let input = InputHandler::with_history(config.shell.prompt.clone(), config.history_path())?;
        Ok(Self::with_input(handler, store, input, &config.store.backend, show_sources))
    }

    /// Create a shell without history on disk
    pub fn ephemeral(
        handler: Arc<QueryHandler>,
        store: Arc<dyn VectorStore>,
        shell: &ShellConfig,
        backend: &str,
    ) -> Result<Self> {
        let input = InputHandler::new(shell.prompt.clone())?;
        Ok(Self::with_input(handler, store, input, backend, false))
    }

    fn with_input(
        handler: Arc<QueryHandler>,
        store: Arc<dyn VectorStore>,
        input: InputHandler,
        backend: &str,
        show_sources: bool,
    ) -> Self {
        Self {
            handler,
            store,
            input,
            display: DisplayManager::new(),
            backend: backend.to_string(),
            show_sources,
        }
    }

    /// Show welcome banner
    pub async fn show_welcome(&self, version: &str, chat_model: &str) -> Result<()> {
        let chunks = self.store.count().await?;
        self.display.show_banner(version, chat_model, chunks);
        Ok(())
    }

    /// Read and execute commands until exit or EOF
    pub async fn run(&mut self) -> Result<()> {
        loop {
            match self.input.read_line()? {
                InputEvent::Line(line) => {
                    let command = commands::parse(&line);
                    if !self.execute(command).await? {
                        break;
                    }
                }
                InputEvent::Interrupted => {
                    println!("\nUse exit to quit");
                }
                InputEvent::Eof => break,
            }
        }

        self.input.save_history()
    }

    /// Execute one command; returns false when the shell should exit
    pub async fn execute(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Question { text } => {
                if text.is_empty() {
                    self.display.show_usage();
                } else {
                    self.ask(&text).await;
                }
            }
            Command::Help => self.display.show_help(&commands::help_entries()),
            Command::History { limit } => {
                let entries = self
                    .input
                    .recent_history(limit.unwrap_or(DEFAULT_HISTORY_LIMIT))?;
                self.display.show_history(&entries);
            }
            Command::Status => match self.store.count().await {
                Ok(chunks) => self.display.show_status(&self.backend, chunks),
                Err(e) => self.display.show_error(&e.to_string()),
            },
            Command::Clear => self.display.clear_screen()?,
            Command::Exit => {
                self.display.show_info("Goodbye!");
                return Ok(false);
            }
            Command::Empty => {}
            Command::Unknown { input } => {
                self.display.show_error(&format!("Unknown command: {}", input));
                self.display.show_usage();
            }
        }

        Ok(true)
    }

    /// Answer a question; failures are printed, not returned
    async fn ask(&self, question: &str) {
        let spinner = self.display.start_spinner("Thinking...");
        let result = self.handler.answer(question).await;
        spinner.finish_and_clear();

        match result {
            Ok(answer) => {
                self.display.show_answer(&answer.answer);
                if self.show_sources {
                    self.display.show_sources(&answer.sources);
                }
            }
            Err(e) => self.display.show_error(&e.to_string()),
        }
    }
}
