//! ragshell - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use ragshell::{
    bootstrap::Application,
    cli::{Args, Commands, Config},
    ingestion::LoadOutcome,
    repl::{display::source_lines, Shell},
    telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = args.verbosity();
    telemetry::init_logging(verbosity);

    let config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    let app = start(config).await?;

    match &args.command {
        Some(Commands::Ask { question }) => {
            let answer = app.query_handler().answer(question).await?;
            println!("{}", answer.answer);
            if verbosity.show_sources() {
                for line in source_lines(&answer.sources) {
                    eprintln!("{}", line.dimmed());
                }
            }
        }
        None => {
            let mut shell = Shell::new(
                app.query_handler(),
                app.store(),
                app.config(),
                verbosity.show_sources(),
            )?;
            shell
                .show_welcome(env!("CARGO_PKG_VERSION"), &app.config().openai.chat_model)
                .await?;
            shell.run().await?;
        }
    }

    Ok(())
}

/// Bootstrap behind a spinner and report what the loader did
async fn start(config: Config) -> Result<Application> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Preparing vector store...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = Application::bootstrap(config).await;
    spinner.finish_and_clear();
    let app = result.context("Startup failed")?;

    match app.load_outcome() {
        LoadOutcome::Skipped { existing } => {
            eprintln!("{} Using {} stored chunks", "✓".green(), existing);
        }
        LoadOutcome::Loaded { pages, chunks } => {
            eprintln!(
                "{} Ingested {} pages into {} chunks",
                "✓".green(),
                pages,
                chunks
            );
        }
    }

    Ok(app)
}
