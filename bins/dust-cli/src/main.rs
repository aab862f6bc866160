//! dust-cli: Query vesting state from an indexed snapshot.
//!
//! Loads a JSON snapshot into memory and prints account detail, owner or
//! global projections, or point-in-time totals as JSON on stdout. Logs go
//! to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use dust_core::types::{AccountId, Owner};
use dust_projection::calendar::{format_timestamp, now_unix};
use dust_projection::ProjectionCache;
use dust_service::{MemoryStore, ServiceConfig, VestingService};
use dust_vesting::VestingEngine;

/// Dust vesting queries.
#[derive(Parser, Debug)]
#[command(name = "dust-cli")]
#[command(version, about = "Vesting, community reward, and projection queries")]
struct Cli {
    /// Config file (TOML, YAML, or JSON). `DUST_*` variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot file; overrides the configured path.
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Log level filter (e.g. "info", "dust_projection=debug").
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format: "text" or "json".
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Evaluate as if the current time were this unix timestamp.
    #[arg(long, global = true)]
    now: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Vesting detail of one account.
    Account {
        /// Account (token) id.
        id: u64,
    },
    /// 24-month projection of one holder's accounts.
    Owner {
        /// Holder address; case-insensitive.
        address: String,
    },
    /// 24-month projection across all holders.
    Projection,
    /// Totals across all holders at one timestamp, with no assumed accrual.
    Totals {
        /// Unix timestamp; defaults to now.
        #[arg(long)]
        at: Option<u64>,
    },
}

impl Cli {
    /// Merge command-line overrides into the loaded configuration.
    fn into_config(self) -> Result<(ServiceConfig, Commands, u64)> {
        let mut config = ServiceConfig::load(self.config.as_deref()).context("loading configuration")?;
        if let Some(path) = self.snapshot {
            config.snapshot_path = path;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config.validate().context("validating configuration")?;
        let now = self.now.unwrap_or_else(now_unix);
        Ok((config, self.command, now))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, command, now) = cli.into_config()?;

    init_logging(&config.log_level, &config.log_format);

    let store = MemoryStore::from_json_file(&config.snapshot_path)
        .with_context(|| format!("loading snapshot {}", config.snapshot_path.display()))?;
    let engine = VestingEngine::new(config.schedule).context("schedule parameters")?;
    let service = VestingService::new(Arc::new(store), engine, Arc::new(ProjectionCache::new()));

    info!(now = %format_timestamp(now), "evaluating");

    match command {
        Commands::Account { id } => {
            let result = service
                .account_vesting(AccountId(id), now)
                .await
                .with_context(|| format!("account {id}"))?;
            print_json(&result)
        }
        Commands::Owner { address } => {
            let owner = Owner::new(&address);
            let projection = service
                .owner_projection(&owner, now)
                .await
                .with_context(|| format!("owner {owner}"))?;
            print_json(&projection)
        }
        Commands::Projection => {
            let snapshots = service.global_projection(now).await.context("global projection")?;
            print_json(&snapshots)
        }
        Commands::Totals { at } => {
            let timestamp = at.unwrap_or(now);
            let totals = service.totals_at(timestamp).await.context("totals")?;
            print_json(&totals)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{json}");
    Ok(())
}

/// Initialize tracing on stderr. `RUST_LOG` wins over `level_str`.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
