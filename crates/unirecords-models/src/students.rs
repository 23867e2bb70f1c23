//! Student models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use unirecords_core::QueryParams;
use unirecords_core::pagination::{PaginationParams, push_opt};
use unirecords_core::serde::deserialize_optional_f64;
use validator::Validate;

use crate::common::{ParseValueError, UserSummary};
use crate::governance::Department;
use crate::ids::{DepartmentId, StudentId, UserId, required_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    #[default]
    Active,
    Suspended,
    Graduated,
    Withdrawn,
    Deferred,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 5] = [
        Self::Active,
        Self::Suspended,
        Self::Graduated,
        Self::Withdrawn,
        Self::Deferred,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Graduated => "GRADUATED",
            Self::Withdrawn => "WITHDRAWN",
            Self::Deferred => "DEFERRED",
        }
    }

    /// Whether the student still takes part in promotions and result entry.
    pub fn is_enrolled(&self) -> bool {
        matches!(self, Self::Active | Self::Deferred)
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseValueError::new("student status", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub matric_number: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
    pub department_id: DepartmentId,
    #[serde(default)]
    pub department: Option<Box<Department>>,
    pub level: u32,
    #[serde(default)]
    pub status: StudentStatus,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub admission_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub graduation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(UserSummary::display_name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.matric_number.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentInput {
    #[validate(custom(function = "required_id"))]
    pub user_id: UserId,
    #[validate(length(min = 1, message = "Matric number is required"))]
    pub matric_number: String,
    #[validate(custom(function = "required_id"))]
    pub department_id: DepartmentId,
    #[validate(range(min = 100, message = "Level must be at least 100"))]
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "required_id"))]
    pub department_id: Option<DepartmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 100, message = "Level must be at least 100"))]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 5.0, message = "CGPA must be between 0 and 5"))]
    pub cgpa: Option<f64>,
}

/// Moves a group of students to a new level in one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkPromoteInput {
    #[validate(length(min = 1, message = "Select at least one student"))]
    pub student_ids: Vec<StudentId>,
    #[validate(range(min = 100, message = "Level must be at least 100"))]
    pub new_level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StudentListParams {
    pub pagination: PaginationParams,
    pub department_id: Option<DepartmentId>,
    pub level: Option<u32>,
    pub status: Option<StudentStatus>,
}

impl StudentListParams {
    /// Builds list parameters from raw filter-bar values.
    ///
    /// Blank values and the `all` sentinel clear a filter. A level or status
    /// that does not parse is ignored rather than sent; use
    /// [`parse_select`](crate::common::parse_select) where a bad value must be
    /// reported instead.
    pub fn from_filters(department: &str, level: &str, status: &str, search: &str) -> Self {
        let pagination = match crate::common::select_value(search) {
            Some(term) => PaginationParams::default().with_search(term),
            None => PaginationParams::default(),
        };

        Self {
            pagination,
            department_id: crate::common::select_value(department).map(DepartmentId::from),
            level: crate::common::select_value(level).and_then(|l| l.parse().ok()),
            status: crate::common::select_value(status).and_then(|s| s.parse().ok()),
        }
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = pagination;
        self
    }
}

impl QueryParams for StudentListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.pagination.query_pairs();
        push_opt(&mut pairs, "departmentId", self.department_id.as_ref());
        push_opt(&mut pairs, "level", self.level);
        push_opt(&mut pairs, "status", self.status);
        pairs
    }
}
