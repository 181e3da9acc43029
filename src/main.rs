// src/main.rs

//! newsblur-cleaner CLI
//!
//! Logs into NewsBlur, examines every feed with unread stories, and marks
//! the stories selected by the configured cleanup policies as read.

use std::path::PathBuf;

use clap::Parser;
use newsblur_cleaner::{
    error::Result,
    models::{Config, RunOptions},
    pipeline::run_cleaner,
    services::{NewsBlurClient, WhatlangDetector},
};

/// NewsBlur unread-story cleaner
#[derive(Parser, Debug)]
#[command(
    name = "newsblur-cleaner",
    version,
    about = "Purges unread NewsBlur stories by policy and marks them as read"
)]
struct Cli {
    /// NewsBlur account username
    #[arg(long)]
    username: String,

    /// NewsBlur account password
    #[arg(long)]
    password: String,

    /// Purge stories whose title or permalink was already kept this run
    #[arg(long)]
    deduplicate: bool,

    /// Purge stories older than this many days
    #[arg(long = "max_days_old", value_parser = clap::value_parser!(u32).range(1..))]
    max_days_old: Option<u32>,

    /// Keep at most this many stories per feed, purge the rest
    #[arg(long = "max_stories_per_feed", value_parser = clap::value_parser!(u32).range(1..))]
    max_stories_per_feed: Option<u32>,

    /// Keep only stories detected as this language (repeatable)
    #[arg(long = "language", value_name = "CODE")]
    language: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(cli).await {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    let options = RunOptions {
        deduplicate: cli.deduplicate,
        max_days_old: cli.max_days_old,
        max_stories_per_feed: cli.max_stories_per_feed,
        languages: cli.language.into_iter().collect(),
    };

    let client = NewsBlurClient::login(&config.client, &cli.username, &cli.password).await?;

    // The session is torn down on the success and the error path alike.
    let outcome = run_cleaner(&client, &WhatlangDetector, &options).await;
    client.logout().await;
    outcome?;

    log::info!("Done");
    Ok(())
}
