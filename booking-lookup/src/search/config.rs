//! Search configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default debounce interval for server-side filtering.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Where station names are filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterStrategy {
    /// Substring filter over the already-fetched station list.
    #[default]
    Local,
    /// One debounced server round trip per input change.
    Remote,
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search strategy {0:?}: expected \"local\" or \"remote\"")]
pub struct InvalidStrategy(String);

impl FromStr for FilterStrategy {
    type Err = InvalidStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(FilterStrategy::Local),
            "remote" => Ok(FilterStrategy::Remote),
            _ => Err(InvalidStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for FilterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStrategy::Local => f.write_str("local"),
            FilterStrategy::Remote => f.write_str("remote"),
        }
    }
}

/// Configuration for the station search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Filtering strategy.
    pub strategy: FilterStrategy,

    /// How long input must be idle before a remote query is sent.
    /// Ignored by the local strategy.
    pub debounce: Duration,
}

impl SearchConfig {
    /// Create a configuration with the given strategy and debounce interval.
    pub fn new(strategy: FilterStrategy, debounce: Duration) -> Self {
        Self { strategy, debounce }
    }

    /// Set the strategy.
    pub fn with_strategy(mut self, strategy: FilterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the debounce interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: FilterStrategy::Local,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}
