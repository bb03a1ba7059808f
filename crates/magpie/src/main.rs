//! Magpie binary.
//!
//! Subcommands:
//! - `run` launches the posting loop and the liveness HTTP server
//! - `check` loads the corpus and reports entry statistics
//! - `split` runs the segmenter over a line of text

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, check_corpus, run_bot, split_line};

    // Credentials and the PORT override may come from a .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run { dry_run } => run_bot(cli.config.as_deref(), dry_run).await?,
        Commands::Check => check_corpus(cli.config.as_deref())?,
        Commands::Split { text, limit } => split_line(text, limit)?,
    }

    Ok(())
}
