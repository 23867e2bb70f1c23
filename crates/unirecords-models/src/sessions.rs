//! Academic session models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use unirecords_core::QueryParams;
use unirecords_core::pagination::PaginationParams;
use validator::{Validate, ValidationError};

use crate::ids::SessionId;

/// An academic session (`2025/2026`). At most one session is active; the
/// backend deactivates the previous one when another is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSession {
    pub id: SessionId,
    pub label: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AcademicSession {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_date && at <= self.end_date
    }
}

fn validate_session_dates(input: &CreateSessionInput) -> Result<(), ValidationError> {
    if input.end_date <= input.start_date {
        return Err(ValidationError::new("date_order")
            .with_message(std::borrow::Cow::Borrowed("End date must be after start date")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_session_dates"))]
pub struct CreateSessionInput {
    #[validate(length(min = 1, message = "Session label is required"))]
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Session label is required"))]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SessionListParams {
    pub pagination: PaginationParams,
}

impl QueryParams for SessionListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.pagination.query_pairs()
    }
}
