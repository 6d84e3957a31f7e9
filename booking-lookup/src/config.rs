//! Application configuration.
//!
//! Every setting has a default and can be overridden through the
//! environment:
//!
//! | Variable               | Default                      |
//! |------------------------|------------------------------|
//! | `BOOKING_API_URL`      | [`DEFAULT_BASE_URL`]         |
//! | `BIND_ADDR`            | `127.0.0.1:3000`             |
//! | `REQUEST_TIMEOUT_SECS` | `30`                         |
//! | `SEARCH_STRATEGY`      | `local`                      |
//! | `SEARCH_DEBOUNCE_MS`   | `500`                        |
//! | `STATIC_DIR`           | `static`                     |
//! | `FIXTURE_PATH`         | unset (use the remote API)   |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::gateway::{DEFAULT_BASE_URL, GatewayConfig};
use crate::search::SearchConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 3000);

/// Default directory for static assets.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Errors reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A value could not be parsed
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Remote API settings.
    pub gateway: GatewayConfig,

    /// Address the server listens on.
    pub bind_addr: SocketAddr,

    /// Station search settings.
    pub search: SearchConfig,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Serve station data from this JSON file instead of the remote API.
    pub fixture_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("BOOKING_API_URL") {
            config.gateway = GatewayConfig::new(url).with_timeout(config.gateway.timeout_secs);
        }

        if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("REQUEST_TIMEOUT_SECS", &secs, e))?;
            if secs == 0 {
                return Err(ConfigError::invalid(
                    "REQUEST_TIMEOUT_SECS",
                    "0",
                    "must be positive",
                ));
            }
            config.gateway = config.gateway.with_timeout(secs);
        }

        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("BIND_ADDR", &addr, e))?;
        }

        if let Some(strategy) = get("SEARCH_STRATEGY") {
            let parsed = strategy
                .parse()
                .map_err(|e| ConfigError::invalid("SEARCH_STRATEGY", &strategy, e))?;
            config.search = config.search.with_strategy(parsed);
        }

        if let Some(ms) = get("SEARCH_DEBOUNCE_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("SEARCH_DEBOUNCE_MS", &ms, e))?;
            config.search = config.search.with_debounce(Duration::from_millis(ms));
        }

        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        config.fixture_path = get("FIXTURE_PATH").map(PathBuf::from);

        Ok(config)
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the search configuration.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Serve station data from a JSON fixture.
    pub fn with_fixture(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixture_path = Some(path.into());
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::new(DEFAULT_BASE_URL),
            bind_addr: DEFAULT_BIND_ADDR,
            search: SearchConfig::default(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            fixture_path: None,
        }
    }
}
