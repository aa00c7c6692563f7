//! Configuration loading and management

mod io;

use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::hackerone::{DEFAULT_ENDPOINT, HttpTransport, QueryOptions, Scanner};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "bounty-targets.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// GraphQL endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Read timeout per request. Pages with many nested scopes can be slow.
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Types, collections, exclusions and page sizes for the programs query
    #[serde(default)]
    pub query: QueryOptions,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    concat!("bounty-targets/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            query: QueryOptions::default(),
        }
    }
}

impl Config {
    /// Reject values that would produce an unusable query or transport
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            bail!("endpoint must not be empty");
        }
        validate_query(&self.query)
    }

    /// HTTP transport for the configured endpoint
    pub fn transport(&self) -> HttpTransport {
        HttpTransport::with_timeouts(
            &self.endpoint,
            Duration::from_secs(self.connect_timeout_secs),
            Duration::from_secs(self.read_timeout_secs),
        )
        .with_user_agent(&self.user_agent)
    }

    /// Scanner wired to the configured transport and query options
    pub fn scanner(&self) -> Scanner<HttpTransport> {
        Scanner::with_options(self.transport(), self.query.clone())
    }
}

fn validate_query(query: &QueryOptions) -> Result<()> {
    if query.outer_page_size == 0 || query.inner_page_size == 0 {
        bail!("query page sizes must be greater than zero");
    }

    let names = [
        ("outer_type", &query.outer_type),
        ("inner_type", &query.inner_type),
        ("page_info_type", &query.page_info_type),
        ("outer_collection", &query.outer_collection),
        ("inner_collection", &query.inner_collection),
        ("count_field", &query.count_field),
    ];
    if let Some((key, _)) = names.iter().find(|(_, value)| value.trim().is_empty()) {
        bail!("query.{} must not be empty", key);
    }

    Ok(())
}
