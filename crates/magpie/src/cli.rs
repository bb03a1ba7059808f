//! Command-line interface definitions and handlers.

use clap::{Parser, Subcommand};
use magpie::{ApiState, BotConfig, BotMetrics, PostScheduler, create_router};
use magpie_core::{Corpus, CorpusHandle, segment};
use magpie_error::{MagpieError, MagpieErrorKind};
use magpie_social::{NoOpPublisher, Publisher, TwitterClient};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Read;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "magpie",
    about = "Posts lines from a fixed text corpus to Twitter on a jittered schedule"
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the posting bot
    Run {
        /// Log posts instead of sending them to the platform
        #[arg(long)]
        dry_run: bool,
    },

    /// Load the corpus and report entry statistics
    Check,

    /// Split a line into publishable chunks and print them
    Split {
        /// Text to split; reads stdin when omitted
        text: Option<String>,

        /// Maximum characters per chunk
        #[arg(long, default_value_t = 138)]
        limit: usize,
    },
}

/// Run the posting bot until a termination signal arrives.
pub async fn run_bot(
    config_path: Option<&Path>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = BotConfig::load(config_path)?;
    for warning in config.validate()? {
        warn!("{warning}");
    }

    // Corpus load failure at startup is fatal. The scheduler never starts
    // without a corpus.
    let corpus = Corpus::load(&config.corpus.path)?;
    if corpus.is_empty() {
        return Err(MagpieError::new(MagpieErrorKind::EmptyCorpus).into());
    }

    let handle = CorpusHandle::new(corpus);
    let metrics = BotMetrics::new();
    let rng = StdRng::from_entropy();

    let state = ApiState::new(
        handle.clone(),
        config.corpus.path.clone(),
        metrics.clone(),
    );
    let router = create_router(state, config.server.enable_reload);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.effective_port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, reload_enabled = config.server.enable_reload, "Starting server");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, "HTTP server terminated");
        }
    });

    if dry_run {
        info!("Dry run: posts will be logged, not published");
        spawn_scheduler(&config, handle, NoOpPublisher::new(), rng, metrics);
    } else {
        let publisher =
            TwitterClient::from_env()?.with_max_post_chars(config.posting.max_post_chars);
        spawn_scheduler(&config, handle, publisher, rng, metrics);
    }

    shutdown_signal().await;
    info!("Shutting down");
    Ok(())
}

fn spawn_scheduler<P: Publisher + 'static>(
    config: &BotConfig,
    corpus: CorpusHandle,
    publisher: P,
    rng: StdRng,
    metrics: BotMetrics,
) {
    let scheduler = PostScheduler::new(
        config.posting.clone(),
        corpus,
        Arc::new(publisher),
        rng,
        metrics,
    );
    tokio::spawn(scheduler.run());
}

/// Load the corpus and report how much of it is publishable.
pub fn check_corpus(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = BotConfig::load(config_path)?;
    let corpus = Corpus::load(&config.corpus.path)?;

    let ceiling = config.posting.max_post_chars;
    let oversized = corpus
        .entries()
        .iter()
        .filter(|entry| entry.chars().count() > ceiling)
        .count();

    println!(
        "{}: {} entries, {} exceed the {}-character ceiling",
        config.corpus.path.display(),
        corpus.len(),
        oversized,
        ceiling
    );

    if corpus.len() == oversized {
        warn!("No entry fits the publish ceiling, the bot would never post");
    }

    Ok(())
}

/// Split a line into chunks of at most `limit` characters and print them.
pub fn split_line(
    text: Option<String>,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    for chunk in segment(&input, limit) {
        println!("{chunk}");
    }

    Ok(())
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
