//! Weather Underground API client and cache-aware resolver
//!
//! `WxClient` performs the single REST GET against the provider;
//! `WeatherStation` wires the client, the on-disk cache and the runtime
//! configuration together and implements the cache-or-fetch policy.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::data::Payload;
use crate::error::WxError;

/// Base URL for the Weather Underground API
const WU_BASE_URL: &str = "http://api.wunderground.com/api";

/// Requested feature set: alerts, current conditions, ten-day and hourly
const FEATURES: &str = "alerts/conditions/forecast10day/hourly";

/// Request settings: best-guess forecast on
const SETTINGS: &str = "bestfct:1";

/// Client for fetching forecast payloads from Weather Underground
#[derive(Debug, Clone)]
pub struct WxClient {
    client: Client,
    base_url: String,
}

impl Default for WxClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WxClient {
    /// Creates a new WxClient against the production endpoint
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: WU_BASE_URL.to_string(),
        }
    }

    /// Creates a new WxClient with a custom base URL
    ///
    /// Useful for pointing tests at a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the request URL for the given key and location query
    pub fn request_url(&self, api_key: &str, query: &str) -> String {
        format!(
            "{}/{}/{}/{}/q/{}.json",
            self.base_url, api_key, FEATURES, SETTINGS, query
        )
    }

    /// Performs the single GET against the provider and parses the response
    ///
    /// # Errors
    /// Fails on any transport error or when the body is not valid JSON; both
    /// are hard failures with no retry.
    pub async fn fetch(&self, api_key: &str, query: &str) -> Result<Value, WxError> {
        let url = self.request_url(api_key, query);
        debug!(%url, "requesting forecast");

        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;
        let payload: Value = serde_json::from_str(&text)?;
        Ok(payload)
    }
}

/// Cache-aware forecast resolver for one configured location
#[derive(Debug, Clone)]
pub struct WeatherStation {
    store: CacheStore,
    client: WxClient,
    config: Config,
}

impl WeatherStation {
    /// Creates a station from its collaborators
    pub fn new(store: CacheStore, client: WxClient, config: Config) -> Self {
        Self {
            store,
            client,
            config,
        }
    }

    /// Produces the forecast payload, from cache when fresh, live otherwise
    ///
    /// A stale entry is deleted up front; a readable entry is served as-is;
    /// anything else (absent or corrupt) falls through to exactly one live
    /// fetch whose result is persisted best-effort.
    ///
    /// # Errors
    /// Fails when the live fetch is needed and the request or response
    /// parsing fails. Cache persistence failures are logged and swallowed.
    pub async fn resolve(&self) -> Result<Payload, WxError> {
        let path = self.store.entry_path(&self.config.query);
        self.store
            .invalidate_if_stale(&path, self.config.freshness_minutes);

        if let Some(cached) = self.store.read_payload(&path) {
            debug!(path = %path.display(), "serving forecast from cache");
            return Ok(Payload::new(cached));
        }

        let fetched = self
            .client
            .fetch(&self.config.api_key, &self.config.query)
            .await?;
        if let Err(err) = self.store.write_payload(&path, &fetched) {
            warn!(path = %path.display(), %err, "failed to persist forecast cache");
        }
        Ok(Payload::new(fetched))
    }
}
