//! Application configuration.
//!
//! Every setting has a default; `DISORDER_MAP_*` environment variables
//! override them.

use std::net::SocketAddr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::feeds::{FeedConfig, FeedKind};

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,

    /// Directory served below `/static`.
    pub static_dir: String,

    /// Time between background refreshes.
    pub refresh_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
            refresh_interval: Duration::from_secs(5 * 60),
        }
    }
}

/// All settings of the server binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub feeds: FeedConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = AppConfig::default();

        if let Some(url) = get("DISORDER_MAP_BASE_URL") {
            config.feeds = config.feeds.with_base_url(url.trim());
        }
        for (var, kind) in [
            ("DISORDER_MAP_STATIONS_PATH", FeedKind::Stations),
            ("DISORDER_MAP_LOCATIONS_PATH", FeedKind::Locations),
            ("DISORDER_MAP_STAIRS_PATH", FeedKind::Stairs),
            ("DISORDER_MAP_ELEVATORS_PATH", FeedKind::Elevators),
        ] {
            if let Some(path) = get(var) {
                config.feeds = config.feeds.with_path(kind, path.trim());
            }
        }
        if let Some(value) = get("DISORDER_MAP_TIMEOUT_SECS") {
            let secs = parse_secs("DISORDER_MAP_TIMEOUT_SECS", &value)?;
            config.feeds = config.feeds.with_timeout(secs);
        }

        if let Some(value) = get("DISORDER_MAP_CACHE_TTL_SECS") {
            config.cache.ttl =
                Duration::from_secs(parse_secs("DISORDER_MAP_CACHE_TTL_SECS", &value)?);
        }
        if let Some(value) = get("DISORDER_MAP_CACHE_CAPACITY") {
            config.cache.max_capacity =
                value
                    .trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                        var: "DISORDER_MAP_CACHE_CAPACITY",
                        value: value.clone(),
                        reason: e.to_string(),
                    })?;
        }

        if let Some(value) = get("DISORDER_MAP_BIND") {
            config.server.bind =
                value
                    .trim()
                    .parse()
                    .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                        var: "DISORDER_MAP_BIND",
                        value: value.clone(),
                        reason: e.to_string(),
                    })?;
        }
        if let Some(dir) = get("DISORDER_MAP_STATIC_DIR") {
            config.server.static_dir = dir;
        }
        if let Some(value) = get("DISORDER_MAP_REFRESH_SECS") {
            config.server.refresh_interval =
                Duration::from_secs(parse_secs("DISORDER_MAP_REFRESH_SECS", &value)?);
        }

        Ok(config)
    }
}

/// A positive number of seconds.
fn parse_secs(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason,
    };
    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero".to_string())),
        Ok(secs) => Ok(secs),
        Err(e) => Err(invalid(e.to_string())),
    }
}
