//! Job configuration loaded from the environment

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default store location for local development
///
/// The store must already exist; the job never creates it.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://~/.nursery/nursery.db";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Backfill configuration
///
/// # Environment Variables
///
/// - `NURSERY_DATABASE_URL`: SQLite path or URL (default: `sqlite://~/.nursery/nursery.db`)
/// - `NURSERY_LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
#[derive(Debug, Clone, Deserialize)]
pub struct BackfillConfig {
    pub database_url: String,
    pub log_format: LogFormat,
}

impl BackfillConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix("NURSERY"))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let raw: BackfillConfig = config::Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("log_format", "pretty")?
            .add_source(source)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(Self {
            database_url: expand_database_url(&raw.database_url),
            ..raw
        })
    }
}

/// Expand a leading `~` in plain paths; URLs and in-memory targets pass through
fn expand_database_url(value: &str) -> String {
    match value.strip_prefix("sqlite://") {
        Some(path) => format!("sqlite://{}", shellexpand::tilde(path)),
        None => shellexpand::tilde(value).into_owned(),
    }
}
