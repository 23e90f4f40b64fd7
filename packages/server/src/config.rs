use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// JSON file holding the site collection
    pub sites_file: PathBuf,
    /// Directory with `card.schema.json` and `site.schema.json`; bundled
    /// schemas are used when unset
    pub schema_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            sites_file: env::var("SITES_FILE")
                .unwrap_or_else(|_| "data/sites.json".to_string())
                .into(),
            schema_dir: env::var("SCHEMA_DIR")
                .ok()
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        })
    }
}
