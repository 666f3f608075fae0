//! Seeder configuration.
//!
//! Built once at startup and passed to the components that need it; nothing
//! below the binary reads the environment on its own.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const ENV_DATA_DIR: &str = "SEED_DATA_DIR";
pub const ENV_DATABASE_URL: &str = "INVENTORY_SERVICE_DATABASE_URL";
pub const ENV_HALT_ON_INVALID: &str = "SEED_HALT_ON_INVALID";
pub const ENV_MAX_CONNECTIONS: &str = "SEED_DB_MAX_CONNECTIONS";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// What to do with a record that cannot be expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the item as skipped and keep seeding the rest.
    #[default]
    Skip,
    /// Abort the whole run before anything is written.
    Halt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeederConfig {
    /// Directory holding `inventory.json` and `products.json`.
    pub data_dir: PathBuf,
    /// Inventory database; `None` means rows are only kept in memory.
    pub database_url: Option<String>,
    pub failure_policy: FailurePolicy,
    pub max_connections: u32,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            database_url: None,
            failure_policy: FailurePolicy::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl SeederConfig {
    /// Build from the process environment (see the `ENV_*` constants).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = non_blank(lookup(ENV_DATA_DIR)) {
            config.data_dir = PathBuf::from(dir);
        }
        config.database_url = non_blank(lookup(ENV_DATABASE_URL));

        if let Some(raw) = non_blank(lookup(ENV_HALT_ON_INVALID)) {
            match parse_flag(&raw) {
                Some(true) => config.failure_policy = FailurePolicy::Halt,
                Some(false) => config.failure_policy = FailurePolicy::Skip,
                None => warn!(key = ENV_HALT_ON_INVALID, value = %raw, "unrecognized flag value; ignoring"),
            }
        }

        if let Some(raw) = non_blank(lookup(ENV_MAX_CONNECTIONS)) {
            match raw.parse::<u32>() {
                Ok(n) if n > 0 => config.max_connections = n,
                _ => warn!(
                    key = ENV_MAX_CONNECTIONS,
                    value = %raw,
                    fallback = DEFAULT_MAX_CONNECTIONS,
                    "invalid connection count; using default"
                ),
            }
        }

        config
    }

    /// `host[:port]` of the database, without credentials, for logging.
    pub fn database_target(&self) -> Option<&str> {
        let url = self.database_url.as_deref()?;
        let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
        let authority = rest.split(['/', '?']).next().unwrap_or(rest);
        Some(authority.rsplit_once('@').map_or(authority, |(_, host)| host))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
