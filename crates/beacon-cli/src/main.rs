//! Beacon CLI - drive the collection pipeline from the command line
//!
//! Usage:
//!   beacon replay <file> --page-url <url>   Replay an occurrence capture
//!   beacon resolve <url>                    Show session resolution for a URL
//!   beacon send --action <kind>             Deliver a single event
//!   beacon init-config <path>               Write a default beacon.toml

use anyhow::{Context, Result};
use beacon_collector::Collector;
use beacon_core::{ActionKind, CollectorConfig, WirePayload};
use beacon_events::{normalize, Occurrence};
use beacon_session::{pathname, resolve, FileBackend, IdentityStore};
use beacon_transport::Transport;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "beacon")]
#[command(author, version, about = "Page-event collection pipeline driver")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (beacon.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the session identity is persisted under
    #[arg(long, default_value = ".beacon")]
    storage_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines occurrence capture through a collector
    Replay {
        /// Capture file, one occurrence per line
        file: PathBuf,

        /// Page URL the capture was recorded on
        #[arg(long, default_value = "https://localhost/")]
        page_url: String,
    },

    /// Show the session resolution for a URL
    Resolve {
        /// Page URL to resolve against the configured storage
        url: String,
    },

    /// Normalize and deliver a single event
    Send {
        /// Action kind (page_view, link_click, button_click, form_submit)
        #[arg(long)]
        action: String,

        /// Event label
        #[arg(long)]
        label: Option<String>,

        /// Document path the event is attributed to
        #[arg(long, default_value = "/")]
        path: String,

        /// Session identifier; falls back to the stored one
        #[arg(long)]
        session: Option<String>,
    },

    /// Write a default beacon.toml
    InitConfig {
        /// Destination path
        #[arg(default_value = "beacon.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = CollectorConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    // The embedded script reads its API key off the host page; the CLI
    // reads it from the environment when the config file has none
    if config.api_key.is_none() {
        if let Ok(key) = std::env::var("BEACON_API_KEY") {
            config.api_key = Some(key);
        }
    }

    match cli.command {
        Commands::Replay { file, page_url } => {
            cmd_replay(config, cli.storage_dir, file, page_url).await
        }
        Commands::Resolve { url } => cmd_resolve(config, cli.storage_dir, url),
        Commands::Send {
            action,
            label,
            path,
            session,
        } => cmd_send(config, cli.storage_dir, action, label, path, session).await,
        Commands::InitConfig { path } => cmd_init_config(path),
    }
}

async fn cmd_replay(
    config: CollectorConfig,
    storage_dir: PathBuf,
    file: PathBuf,
    page_url: String,
) -> Result<()> {
    let content = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read capture file {:?}", file))?;

    let mut collector = Collector::new(config, Box::new(FileBackend::new(storage_dir)), &page_url);
    info!(
        "Replaying against {} (identity: {})",
        page_url,
        collector.identity().unwrap_or("<none>")
    );

    let mut observed = 0usize;
    let mut skipped = 0usize;
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Occurrence>(line) {
            Ok(occurrence) => {
                collector.observe(occurrence).await;
                observed += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", number + 1, e);
                skipped += 1;
            }
        }
    }

    println!("Replayed {} occurrences ({} skipped)", observed, skipped);
    Ok(())
}

fn cmd_resolve(config: CollectorConfig, storage_dir: PathBuf, url: String) -> Result<()> {
    let store = IdentityStore::new(
        Box::new(FileBackend::new(storage_dir)),
        &config.storage_key,
    );
    let resolution = resolve(&url, &store, &config.param_name);

    match &resolution.identity {
        Some(identity) => println!(
            "identity: {} (persisted: {})",
            identity, resolution.persisted
        ),
        None => println!("identity: <none>"),
    }
    println!("pathname: {}", pathname(&url));
    Ok(())
}

async fn cmd_send(
    config: CollectorConfig,
    storage_dir: PathBuf,
    action: String,
    label: Option<String>,
    path: String,
    session: Option<String>,
) -> Result<()> {
    let action = ActionKind::from_str(&action).map_err(anyhow::Error::msg)?;

    let session_id = match session {
        Some(id) => id,
        None => {
            let store = IdentityStore::new(
                Box::new(FileBackend::new(storage_dir)),
                &config.storage_key,
            );
            store
                .get()
                .context("No session identifier given and none stored")?
        }
    };

    let record = normalize(action, label.as_deref(), Some(&path), &path);
    let payload = WirePayload::new(session_id, record);

    // The CLI is a debugging surface, so unlike the embedded pipeline it
    // reports the delivery outcome
    let transport = Transport::from_config(&config);
    match transport.deliver(&payload).await {
        Ok(()) => println!("Delivered {} to {}", payload.action, config.endpoint),
        Err(e) => println!("Delivery failed: {}", e),
    }
    Ok(())
}

fn cmd_init_config(path: PathBuf) -> Result<()> {
    CollectorConfig::write_default(&path)
        .with_context(|| format!("Failed to write {:?}", path))?;
    println!("Wrote default configuration to {:?}", path);
    Ok(())
}
