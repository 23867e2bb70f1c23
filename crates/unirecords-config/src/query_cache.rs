//! Query cache configuration.
//!
//! # Environment Variables
//!
//! - `QUERY_STALE_SECONDS`: How long fetched data counts as fresh (default: `0`)
//! - `QUERY_MAX_ENTRIES`: Maximum number of cached queries (default: `500`)

use std::env;
use std::time::Duration;

use crate::parse_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryCacheConfig {
    /// Freshness window after a successful fetch.
    ///
    /// With the default of zero, cached data is still returned to readers
    /// holding a handle on it, but any new read refetches. Invalidation marks
    /// data stale regardless of this window.
    pub stale_time: Duration,

    /// Maximum number of cached queries before idle entries are evicted.
    pub max_entries: usize,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            max_entries: 500,
        }
    }
}

impl QueryCacheConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            stale_time: Duration::from_secs(parse_or(
                lookup("QUERY_STALE_SECONDS"),
                "QUERY_STALE_SECONDS",
                defaults.stale_time.as_secs(),
            )),
            max_entries: parse_or(
                lookup("QUERY_MAX_ENTRIES"),
                "QUERY_MAX_ENTRIES",
                defaults.max_entries,
            )
            .max(1),
        }
    }

    #[must_use]
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QueryCacheConfig::from_lookup(|_| None);
        assert_eq!(config, QueryCacheConfig::default());
        assert_eq!(config.stale_time, Duration::ZERO);
    }

    #[test]
    fn test_values_from_lookup() {
        let config = QueryCacheConfig::from_lookup(|name| match name {
            "QUERY_STALE_SECONDS" => Some("60".to_string()),
            "QUERY_MAX_ENTRIES" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config.stale_time, Duration::from_secs(60));
        assert_eq!(config.max_entries, 1);
    }
}
