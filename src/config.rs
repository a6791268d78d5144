//! Runtime configuration for the fetch/cache component
//!
//! The original tool kept the query, multiplier and API key in ambient
//! globals; here they are threaded explicitly as a `Config` value constructed
//! once from the CLI and the persisted key file.

use crate::cache::CacheStore;
use crate::cli::Cli;
use crate::error::WxError;

/// Default cache freshness threshold in minutes
pub const DEFAULT_FRESHNESS_MINUTES: u64 = 5;

/// Configuration threaded into the fetch/cache and render components
#[derive(Debug, Clone)]
pub struct Config {
    /// Location query as given on the command line
    pub query: String,
    /// Resolved Weather Underground API key
    pub api_key: String,
    /// Linear size multiplier applied to pixel dimensions
    pub mult: f64,
    /// Base font size for the summary message
    pub font_size: u16,
    /// Maximum cache age before a forced re-fetch
    pub freshness_minutes: u64,
}

impl Config {
    /// Creates a configuration with default multiplier, font size and
    /// freshness threshold
    pub fn new(query: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            api_key: api_key.into(),
            mult: 1.0,
            font_size: 12,
            freshness_minutes: DEFAULT_FRESHNESS_MINUTES,
        }
    }

    /// Builds the configuration from parsed CLI arguments and a resolved key
    pub fn from_cli(cli: &Cli, api_key: String) -> Self {
        Self {
            query: cli.location.clone(),
            api_key,
            mult: cli.mult,
            font_size: cli.size,
            freshness_minutes: DEFAULT_FRESHNESS_MINUTES,
        }
    }

    /// Overrides the freshness threshold
    pub fn with_freshness(mut self, minutes: u64) -> Self {
        self.freshness_minutes = minutes;
        self
    }
}

/// Resolves the API key from the CLI argument or the persisted key file
///
/// A supplied key is persisted for future invocations (last-write-wins) and
/// used as-is. Without a supplied key the persisted one is read; if neither
/// source yields a key the call fails with a configuration error.
pub fn resolve_api_key(supplied: Option<&str>, store: &CacheStore) -> Result<String, WxError> {
    match supplied.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => {
            store.store_api_key(key)?;
            Ok(key.to_string())
        }
        None => store
            .load_api_key()
            .ok_or_else(|| WxError::Config("no API key available".to_string())),
    }
}
