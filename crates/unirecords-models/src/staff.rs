//! Staff models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use unirecords_core::QueryParams;
use unirecords_core::pagination::{PaginationParams, push_opt};
use unirecords_core::serde::deserialize_optional_string;
use validator::Validate;

use crate::common::{ParseValueError, UserSummary};
use crate::courses::Course;
use crate::governance::Department;
use crate::ids::{DepartmentId, StaffId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Visiting,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [Self::FullTime, Self::PartTime, Self::Contract, Self::Visiting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "FULL_TIME",
            Self::PartTime => "PART_TIME",
            Self::Contract => "CONTRACT",
            Self::Visiting => "VISITING",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullTime => "Full Time",
            Self::PartTime => "Part Time",
            Self::Contract => "Contract",
            Self::Visiting => "Visiting",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ParseValueError::new("employment type", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffCounts {
    #[serde(default)]
    pub courses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: StaffId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub staff_number: String,
    pub department_code: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub specialization: Option<String>,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
    pub user: UserSummary,
    #[serde(default)]
    pub department: Option<Box<Department>>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default, rename = "_count")]
    pub counts: Option<StaffCounts>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Staff {
    /// Name shown in lists and selects: `first last`, falling back to the
    /// account name and then the staff number.
    pub fn display_name(&self) -> String {
        let name = self.user.display_name();
        if name.trim().is_empty() {
            self.staff_number.clone()
        } else {
            name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentTypeCount {
    #[serde(rename = "_count")]
    pub count: u32,
    pub employment_type: EmploymentType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStaffCount {
    #[serde(rename = "_count")]
    pub count: u32,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffStats {
    pub total: u32,
    #[serde(default)]
    pub by_employment_type: Vec<EmploymentTypeCount>,
    #[serde(default)]
    pub by_department: Vec<DepartmentStaffCount>,
}

impl StaffStats {
    pub fn count_for(&self, employment_type: EmploymentType) -> u32 {
        self.by_employment_type
            .iter()
            .filter(|c| c.employment_type == employment_type)
            .map(|c| c.count)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffInput {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Staff number is required"))]
    pub staff_number: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Staff number is required"))]
    pub staff_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Department is required"))]
    pub department_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StaffListParams {
    pub pagination: PaginationParams,
    pub department_id: Option<DepartmentId>,
    pub employment_type: Option<EmploymentType>,
}

impl StaffListParams {
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = pagination;
        self
    }

    #[must_use]
    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    #[must_use]
    pub fn with_employment_type(mut self, employment_type: EmploymentType) -> Self {
        self.employment_type = Some(employment_type);
        self
    }
}

impl QueryParams for StaffListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.pagination.query_pairs();
        push_opt(&mut pairs, "departmentId", self.department_id.as_ref());
        push_opt(&mut pairs, "employmentType", self.employment_type);
        pairs
    }
}
