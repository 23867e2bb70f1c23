//! Backend connection configuration.
//!
//! # Environment Variables
//!
//! - `UNIRECORDS_API_URL`: Base URL of the records backend (default: `http://localhost:8000`)
//! - `UNIRECORDS_API_TOKEN`: Bearer token attached to every request (optional)
//! - `UNIRECORDS_API_COOKIE`: Cookie header forwarded verbatim (optional, ignored when a token is set)
//! - `UNIRECORDS_TIMEOUT_SECONDS`: Per-request timeout in seconds (default: `30`)

use std::env;
use std::time::Duration;

use crate::parse_or;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// How requests are credentialed.
///
/// Session handling belongs to the external auth provider; the client only
/// attaches whatever credential it was given.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    #[default]
    None,
    Bearer(String),
    Cookie(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bearer(_) => write!(f, "Bearer(***)"),
            Self::Cookie(_) => write!(f, "Cookie(***)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined onto.
    pub api_url: String,

    /// Credential attached to every request.
    pub credentials: Credentials,

    /// Upper bound for a single request, connect to last byte.
    ///
    /// A request that exceeds it fails with a timeout error instead of
    /// leaving its caller waiting indefinitely.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials: Credentials::None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let credentials = match (
            non_empty("UNIRECORDS_API_TOKEN"),
            non_empty("UNIRECORDS_API_COOKIE"),
        ) {
            (Some(token), _) => Credentials::Bearer(token.trim().to_string()),
            (None, Some(cookie)) => Credentials::Cookie(cookie),
            (None, None) => Credentials::None,
        };

        Self {
            api_url: non_empty("UNIRECORDS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            credentials,
            timeout: Duration::from_secs(parse_or(
                lookup("UNIRECORDS_TIMEOUT_SECONDS"),
                "UNIRECORDS_TIMEOUT_SECONDS",
                DEFAULT_TIMEOUT_SECONDS,
            )),
        }
    }

    /// Same configuration pointed at another backend.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
