//! Logging configuration.
//!
//! # Environment Variables
//!
//! - `LOG_LEVEL`: Default level for UniRecords crates (default: `info`)
//! - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)

use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup("LOG_LEVEL")
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "info".to_string());

        let format = match lookup("LOG_FORMAT").map(|f| f.trim().to_lowercase()) {
            Some(f) if f == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self { level, format }
    }

    /// Filter directive enabling `level` for UniRecords crates and keeping
    /// HTTP internals quiet.
    pub fn filter_directive(&self) -> String {
        format!(
            "unirecords={lvl},unirecords_cache={lvl},unirecords_cli={lvl},reqwest=warn,hyper=warn,hyper_util=warn",
            lvl = self.level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format_is_case_insensitive() {
        let config = LoggingConfig::from_lookup(|name| (name == "LOG_FORMAT").then(|| "JSON".to_string()));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_filter_directive_uses_level() {
        let config = LoggingConfig::from_lookup(|name| (name == "LOG_LEVEL").then(|| "Debug".to_string()));
        let directive = config.filter_directive();
        assert!(directive.starts_with("unirecords=debug"));
        assert!(directive.contains("reqwest=warn"));
    }
}
