//! CLI for maintaining the stored site collection
//!
//! Reads the same configuration as the server (`SITES_FILE`, `SCHEMA_DIR`).
//! Every command prints one JSON object per line so scripts can parse it.

use std::sync::Arc;

use anyhow::{Context, Result};
use cardsite::normalize::all_passes;
use cardsite::site_store::{AuditEntry, NormalizeOutcome};
use cardsite::{SiteSummary, NORMALIZATION_VERSION};
use clap::{Parser, Subcommand};
use serde::Serialize;
use server_core::config::Config;
use server_core::server::{AppState, SharedStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sites_cli")]
#[command(about = "Site collection maintenance CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored sites
    List,

    /// List registered normalization passes
    Passes,

    /// Rewrite stored sites in canonical shape
    Normalize {
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate every stored site against the schemas
    Validate,
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sites: Option<Vec<SiteSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    passes: Option<Vec<PassInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<Vec<NormalizeOutcome>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid: Option<Vec<AuditEntry>>,
}

impl Response {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            sites: None,
            passes: None,
            normalized: None,
            invalid: None,
        }
    }
}

#[derive(Serialize)]
struct PassInfo {
    name: String,
    since_version: u32,
    description: Option<String>,
}

fn output(resp: Response) -> Result<()> {
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries JSON only
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cmd_list().await,
        Commands::Passes => cmd_passes(),
        Commands::Normalize { dry_run } => cmd_normalize(dry_run).await,
        Commands::Validate => cmd_validate().await,
    }
}

fn open_store() -> Result<Arc<SharedStore>> {
    let config = Config::from_env()?;
    let state = AppState::from_config(&config).context("Failed to load site schemas")?;
    Ok(state.store)
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_list() -> Result<()> {
    let store = open_store()?;
    let sites = store.list().await.context("Failed to read site collection")?;

    output(Response {
        count: Some(sites.len()),
        sites: Some(sites),
        ..Response::ok()
    })
}

fn cmd_passes() -> Result<()> {
    let passes: Vec<PassInfo> = all_passes()
        .into_iter()
        .map(|pass| PassInfo {
            name: pass.name().to_string(),
            since_version: pass.since_version(),
            description: {
                let desc = pass.description();
                if desc.is_empty() {
                    None
                } else {
                    Some(desc.to_string())
                }
            },
        })
        .collect();

    output(Response {
        message: Some(format!("Normalization version {}", NORMALIZATION_VERSION)),
        passes: Some(passes),
        ..Response::ok()
    })
}

async fn cmd_normalize(dry_run: bool) -> Result<()> {
    let store = open_store()?;
    let outcomes = store
        .rewrite_normalized(dry_run)
        .await
        .context("Failed to normalize site collection")?;

    let message = match (outcomes.is_empty(), dry_run) {
        (true, _) => "Collection already canonical".to_string(),
        (false, true) => format!("{} site(s) would change (dry run)", outcomes.len()),
        (false, false) => format!("Rewrote {} site(s)", outcomes.len()),
    };

    output(Response {
        message: Some(message),
        count: Some(outcomes.len()),
        normalized: Some(outcomes),
        ..Response::ok()
    })
}

async fn cmd_validate() -> Result<()> {
    let store = open_store()?;
    let invalid: Vec<AuditEntry> = store
        .audit()
        .await
        .context("Failed to read site collection")?
        .into_iter()
        .filter(|entry| !entry.issues.is_empty())
        .collect();

    output(Response {
        success: invalid.is_empty(),
        count: Some(invalid.len()),
        invalid: Some(invalid),
        ..Response::ok()
    })
}
