//! Replace the ticket collection with demonstration data.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use directline_core::{load_config, seed_store, validate_config, SqliteTicketStore};

fn main() {
    if let Err(e) = run() {
        error!("Seeding failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("DIRECTLINE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    let store = SqliteTicketStore::new(&config.database.path)
        .with_context(|| format!("Failed to open ticket store at {:?}", config.database.path))?;

    let inserted = seed_store(&store, Utc::now()).context("Failed to seed tickets")?;
    info!("Seeded {} tickets", inserted);

    Ok(())
}
