//! User administration, dashboard statistics and audit log models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unirecords_core::QueryParams;
use unirecords_core::pagination::{PaginationParams, push_opt};
use unirecords_core::serde::deserialize_optional_string;
use validator::Validate;

use crate::common::{ParseValueError, UserSummary};
use crate::ids::{AuditLogId, UserId, required_id};

/// Role of a user account.
///
/// Older accounts carry lowercase roles; they deserialize to the same
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[serde(alias = "admin")]
    Admin,
    #[serde(alias = "staff")]
    Staff,
    #[serde(alias = "student")]
    Student,
    FacultyDean,
    Hod,
    Senate,
    Lecturer,
    NonTeachingStaff,
}

impl UserRole {
    pub const ALL: [UserRole; 8] = [
        Self::Admin,
        Self::Staff,
        Self::Student,
        Self::FacultyDean,
        Self::Hod,
        Self::Senate,
        Self::Lecturer,
        Self::NonTeachingStaff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Staff => "STAFF",
            Self::Student => "STUDENT",
            Self::FacultyDean => "FACULTY_DEAN",
            Self::Hod => "HOD",
            Self::Senate => "SENATE",
            Self::Lecturer => "LECTURER",
            Self::NonTeachingStaff => "NON_TEACHING_STAFF",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ParseValueError::new("user role", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub role: UserRole,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub ban_reason: Option<String>,
    #[serde(default)]
    pub ban_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AdminUser {
    /// Whether a ban is in force at `now`. Bans without an expiry are
    /// permanent.
    pub fn is_banned_at(&self, now: DateTime<Utc>) -> bool {
        self.is_banned && self.ban_expires_at.is_none_or(|expires| expires > now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BanUserInput {
    #[validate(custom(function = "required_id"))]
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTotals {
    pub total: u64,
    pub students: u64,
    pub staff: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicTotals {
    pub faculties: u64,
    pub departments: u64,
    pub courses: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users: UserTotals,
    pub academic: AcademicTotals,
    #[serde(default)]
    pub current_session: String,
    #[serde(default)]
    pub pending_results: u64,
    #[serde(default)]
    pub recent_payments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: AuditLogId,
    pub user_id: UserId,
    pub action: String,
    pub resource: String,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AdminUserListParams {
    pub pagination: PaginationParams,
    pub role: Option<UserRole>,
}

impl AdminUserListParams {
    pub fn with_role(role: UserRole) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }
}

impl QueryParams for AdminUserListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.pagination.query_pairs();
        push_opt(&mut pairs, "role", self.role);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AuditLogListParams {
    pub pagination: PaginationParams,
    pub user_id: Option<UserId>,
    pub action: Option<String>,
    pub resource: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl QueryParams for AuditLogListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.pagination.query_pairs();
        push_opt(&mut pairs, "userId", self.user_id.as_ref());
        push_opt(&mut pairs, "action", self.action.as_deref().filter(|a| !a.is_empty()));
        push_opt(&mut pairs, "resource", self.resource.as_deref().filter(|r| !r.is_empty()));
        push_opt(&mut pairs, "startDate", self.start_date.map(|d| d.to_rfc3339()));
        push_opt(&mut pairs, "endDate", self.end_date.map(|d| d.to_rfc3339()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_lowercase_roles_deserialize() {
        let role: UserRole = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, UserRole::Admin);
        let role: UserRole = serde_json::from_str(r#""FACULTY_DEAN""#).unwrap();
        assert_eq!(role, UserRole::FacultyDean);
        assert_eq!("non-teaching staff".parse::<UserRole>().unwrap(), UserRole::NonTeachingStaff);
    }

    #[test]
    fn test_ban_expiry() {
        let user: AdminUser = serde_json::from_value(serde_json::json!({
            "id": "usr_1",
            "name": "Eve",
            "email": "eve@uni.edu",
            "role": "STUDENT",
            "isBanned": true,
            "banExpiresAt": "2026-01-01T00:00:00Z"
        }))
        .unwrap();

        let before = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert!(user.is_banned_at(before));
        assert!(!user.is_banned_at(after));
    }

    #[test]
    fn test_create_user_password_length() {
        let input = CreateUserInput {
            name: "Eve".to_string(),
            email: "eve@uni.edu".to_string(),
            password: "short".to_string(),
            role: None,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_audit_log_params_skip_blank_strings() {
        let params = AuditLogListParams {
            action: Some(String::new()),
            resource: Some("faculty".to_string()),
            ..AuditLogListParams::default()
        };
        assert_eq!(params.query_pairs(), vec![("resource", "faculty".to_string())]);
    }
}
