//! Document store configuration, read from the environment.

use std::env;
use std::time::Duration;

use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the hosted document store.
///
/// Every identifier is optional here; code that needs one decides what
/// its absence means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub bucket_id: Option<String>,
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            project_id: None,
            api_key: None,
            database_id: None,
            bucket_id: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl StoreConfig {
    /// Reads `STORE_ENDPOINT`, `STORE_PROJECT_ID`, `STORE_API_KEY`,
    /// `STORE_DATABASE_ID`, `STORE_BUCKET_ID` and `STORE_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            let value = lookup(key).filter(|v| !v.trim().is_empty());
            if value.is_none() {
                debug!("{} not set", key);
            }
            value
        };

        let timeout_secs = match read("STORE_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().unwrap_or_else(|e| {
                warn!(
                    "Invalid STORE_TIMEOUT_SECS value '{}': {}, using default: {}",
                    raw, e, DEFAULT_TIMEOUT_SECS
                );
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            endpoint: read("STORE_ENDPOINT").map(|e| e.trim_end_matches('/').to_string()),
            project_id: read("STORE_PROJECT_ID"),
            api_key: read("STORE_API_KEY"),
            database_id: read("STORE_DATABASE_ID"),
            bucket_id: read("STORE_BUCKET_ID"),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Public URL of a file in the configured bucket.
    ///
    /// Returns an empty string when the endpoint, project or bucket is
    /// missing, so a broken image link degrades instead of failing the page.
    pub fn asset_url(&self, file_id: &str) -> String {
        match (&self.endpoint, &self.project_id, &self.bucket_id) {
            (Some(endpoint), Some(project), Some(bucket)) if !file_id.is_empty() => format!(
                "{}/storage/buckets/{}/files/{}/view?project={}",
                endpoint, bucket, file_id, project
            ),
            _ => String::new(),
        }
    }
}
