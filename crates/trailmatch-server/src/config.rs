//! Server configuration, read from the environment.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use strum_macros::{Display, EnumString};
use tracing::{info, warn};
use trailmatch_infrastructure::StoreConfig;

/// Which document store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreKind {
    Memory,
    Rest,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub fake_contact_delay: Duration,
    pub store_kind: StoreKind,
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn load() -> Self {
        Self {
            port: try_load("TRAILMATCH_PORT", 8080),
            fake_contact_delay: Duration::from_millis(try_load("FAKE_CONTACT_DELAY_MS", 1000)),
            store_kind: try_load("TRAILMATCH_STORE", StoreKind::Memory),
            store: StoreConfig::from_env(),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parses `key`, falling back to `default` when it is unset or invalid.
fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
