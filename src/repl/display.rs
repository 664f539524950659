//! Terminal output for the shell
//!
//! Spinner while hosted calls run, colored answers and errors.

use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

use crate::store::SearchHit;

/// Display manager for shell UI
pub struct DisplayManager {
    update_interval: Duration,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager {
            update_interval: Duration::from_millis(100),
        }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, chat_model: &str, chunks: i64) {
        let width = 64;
        println!("\n{}", "=".repeat(width).cyan());
        println!("{}", format!("  ragshell {} - Ask the reference document", version).bold().cyan());
        println!("{}", format!("  Model: {} | Chunks: {}", chat_model, chunks).dimmed());
        println!("{}\n", "=".repeat(width).cyan());
        println!(
            "Type {} to ask, {} for commands, {} to quit\n",
            "q \"<question>\"".green(),
            "help".green(),
            "exit".green()
        );
    }

    /// Start a spinner; finish it with `finish_and_clear`
    pub fn start_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(self.update_interval);
        pb
    }

    /// Print the model's answer as returned
    pub fn show_answer(&self, answer: &str) {
        println!("\n{}\n", answer);
    }

    /// List retrieved chunks with page and score
    pub fn show_sources(&self, sources: &[SearchHit]) {
        if sources.is_empty() {
            println!("{}", "No matching chunks were retrieved.".yellow());
            return;
        }

        println!("{}", "Sources:".bold());
        for line in source_lines(sources) {
            println!("  {}", line.dimmed());
        }
        println!();
    }

    pub fn show_help(&self, entries: &[(&str, &str)]) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());
        for (cmd, desc) in entries {
            println!("  {:<20} {}", cmd.green(), desc);
        }
        println!();
    }

    pub fn show_usage(&self) {
        println!("{} {}", "Usage:".yellow().bold(), "q \"<question>\"".green());
    }

    pub fn show_history(&self, entries: &[String]) {
        if entries.is_empty() {
            println!("{}", "No history yet.".yellow());
            return;
        }

        println!("\n{}", format!("History (last {}):", entries.len()).bold().cyan());
        for (i, entry) in entries.iter().enumerate() {
            println!("  {} {}", format!("{:>3}.", i + 1).cyan(), entry);
        }
        println!();
    }

    pub fn show_status(&self, backend: &str, chunks: i64) {
        println!("\n{}", "Store Status:".bold().cyan());
        println!("  {:<12} {}", "Backend:", backend);
        println!("  {:<12} {}\n", "Chunks:", chunks);
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per hit: rank, page and similarity
pub fn source_lines(sources: &[SearchHit]) -> Vec<String> {
    sources
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            let page = hit
                .document
                .page_number()
                .map(|p| format!("page {}", p))
                .unwrap_or_else(|| "page ?".to_string());
            format!("{}. {} (score: {:.3})", i + 1, page, hit.score)
        })
        .collect()
}
