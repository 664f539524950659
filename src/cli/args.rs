//! Command-line argument parsing for ragshell
//!
//! Provides clap-based CLI with an optional one-shot subcommand and
//! verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ragshell - ask questions about a reference PDF
#[derive(Parser, Debug)]
#[command(name = "ragshell")]
#[command(version)]
#[command(about = "Ask questions about a reference PDF from an interactive shell", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: default (warnings), -v (info), -vv (debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand (starts the interactive shell when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single question and exit
    Ask {
        /// The question to ask
        question: String,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        match self.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        }
    }
}

impl Verbosity {
    /// Default log filter directive for this level
    pub fn log_directive(&self) -> &'static str {
        match self {
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Check if retrieved sources should be listed with answers
    pub fn show_sources(&self) -> bool {
        !matches!(self, Verbosity::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_starts_shell() {
        let args = Args::parse_from(["ragshell"]);
        assert!(args.command.is_none());
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_ask_subcommand() {
        let args = Args::parse_from(["ragshell", "ask", "What is covered?"]);
        match args.command {
            Some(Commands::Ask { question }) => assert_eq!(question, "What is covered?"),
            _ => panic!("Expected ask subcommand"),
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = Args::parse_from(["ragshell", "-v"]);
        assert_eq!(args.verbosity(), Verbosity::Verbose);
        assert_eq!(args.verbosity().log_directive(), "info");

        let args = Args::parse_from(["ragshell", "-vv"]);
        assert_eq!(args.verbosity(), Verbosity::VeryVerbose);
        assert!(args.verbosity().show_sources());
    }

    #[test]
    fn test_config_flag() {
        let args = Args::parse_from(["ragshell", "--config", "/tmp/ragshell.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/ragshell.toml")));
    }
}
