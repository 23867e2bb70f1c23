//! # UniRecords Config
//!
//! Configuration types for the UniRecords client, loaded from environment
//! variables (a `.env` file is honoured through [`load_dotenv`]):
//!
//! - [`api`]: Backend location, credentials and request timeout
//! - [`query_cache`]: Freshness window and capacity of the query cache
//! - [`logging`]: Log level and output format
//!
//! # Example
//!
//! ```ignore
//! use unirecords_config::{ClientConfig, LoggingConfig, QueryCacheConfig};
//!
//! unirecords_config::load_dotenv();
//! let client_config = ClientConfig::from_env();
//! let cache_config = QueryCacheConfig::from_env();
//! let logging_config = LoggingConfig::from_env();
//! ```

pub mod api;
pub mod logging;
pub mod query_cache;

// Re-export commonly used types at crate root
pub use api::{ClientConfig, Credentials};
pub use logging::{LogFormat, LoggingConfig};
pub use query_cache::QueryCacheConfig;

/// Loads a `.env` file from the working directory if one exists.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }
}

/// Parses an optional environment value, falling back to `default` when it is
/// missing or malformed.
pub(crate) fn parse_or<T: std::str::FromStr>(value: Option<String>, name: &str, default: T) -> T {
    match value {
        Some(raw) => match raw.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(variable = name, value = %raw, "Ignoring malformed configuration value");
                default
            }
        },
        None => default,
    }
}
