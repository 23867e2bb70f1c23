//! Shapes shared across resources: embedded user summaries, acknowledgement
//! bodies, bulk upload reports and file formats.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unirecords_core::serde::deserialize_optional_string;

use crate::ids::UserId;

/// A user account embedded in another entity (dean, HOD, staff member,
/// student, instructor).
///
/// Embedded users are partial: instructor payloads omit the id and most
/// payloads omit the name parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone_number: Option<String>,
}

impl UserSummary {
    /// `first last` when both parts are known, otherwise the account name.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            _ => self.name.clone(),
        }
    }
}

/// `{ success }` acknowledgement returned by deletes and state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `{ success, count }` acknowledgement returned by bulk creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    #[serde(default)]
    pub success: bool,
    pub count: u64,
}

/// One rejected row of a bulk upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUploadError {
    pub row: u32,
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
}

/// Outcome of a bulk upload. Partial success is normal: rows are accepted or
/// rejected individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadResult {
    pub success: bool,
    #[serde(default)]
    pub total_processed: u32,
    #[serde(default)]
    pub success_count: u32,
    #[serde(default)]
    pub failure_count: u32,
    #[serde(default)]
    pub errors: Vec<BulkUploadError>,
}

impl BulkUploadResult {
    pub fn has_failures(&self) -> bool {
        self.failure_count > 0 || !self.errors.is_empty()
    }
}

/// File format accepted by export and template endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
}

impl ExportFormat {
    /// Value of the `format` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }

    /// Conventional download name: `{resource}-{YYYY-MM-DD}.{ext}`.
    pub fn file_name(&self, resource: &str, date: DateTime<Utc>) -> String {
        format!("{resource}-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "excel" | "xlsx" => Ok(Self::Excel),
            _ => Err(ParseValueError::new("export format", s)),
        }
    }
}

/// Returned when parsing an enum from user input fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseValueError {
    kind: &'static str,
    value: String,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseValueError {}

/// Normalises a filter select value: blank and the `all` sentinel mean
/// "no filter".
pub fn select_value(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(value)
    }
}

/// Strict form of [`select_value`]: blank and `all` clear the filter, any
/// other value must parse as `T`.
pub fn parse_select<T: FromStr>(value: &str) -> Result<Option<T>, T::Err> {
    select_value(value).map(str::parse).transpose()
}
