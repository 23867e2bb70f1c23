//! Course models, instructor assignments and course registrations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unirecords_core::QueryParams;
use unirecords_core::pagination::{PaginationParams, push_opt};
use unirecords_core::serde::deserialize_optional_string;
use validator::Validate;

use crate::common::{ParseValueError, UserSummary};
use crate::ids::{CourseId, DepartmentId, StaffId, StudentId, UserId, required_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "FIRST",
            Self::Second => "SECOND",
        }
    }

    /// Ordinal used by the semester results endpoint (`1` or `2`).
    pub fn number(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIRST" | "1" => Ok(Self::First),
            "SECOND" | "2" => Ok(Self::Second),
            _ => Err(ParseValueError::new("semester", s)),
        }
    }
}

/// Staff record embedded in an instructor assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorProfile {
    pub id: StaffId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub staff_number: String,
    pub user: UserSummary,
}

/// Assignment of a staff member to a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInstructor {
    pub id: String,
    pub course_id: CourseId,
    pub instructor_id: StaffId,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub instructor: Option<InstructorProfile>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCounts {
    #[serde(default)]
    pub students: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub title: String,
    pub credits: u32,
    pub department_id: DepartmentId,
    /// Conventionally a multiple of 100.
    pub level: u32,
    pub semester: Semester,
    /// Free-text period label, e.g. `2025/2026`.
    pub academic_year: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub instructors: Vec<CourseInstructor>,
    #[serde(default, rename = "_count")]
    pub counts: Option<CourseCounts>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Course {
    /// The instructor flagged as primary.
    ///
    /// The backend does not guarantee a single primary assignment; if more
    /// than one is flagged, the first in backend order is returned.
    pub fn primary_instructor(&self) -> Option<&CourseInstructor> {
        self.instructors.iter().find(|i| i.is_primary)
    }

    pub fn instructor_ids(&self) -> impl Iterator<Item = &StaffId> {
        self.instructors.iter().map(|i| &i.instructor_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Course code is required"))]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Credits must be at least 1"))]
    pub credits: u32,
    #[validate(custom(function = "required_id"))]
    pub department_id: DepartmentId,
    #[validate(range(min = 100, message = "Level must be at least 100"))]
    pub level: u32,
    pub semester: Semester,
    #[validate(length(min = 1, message = "Academic year is required"))]
    pub academic_year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Course code is required"))]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Credits must be at least 1"))]
    pub credits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "required_id"))]
    pub department_id: Option<DepartmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 100, message = "Level must be at least 100"))]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<Semester>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Academic year is required"))]
    pub academic_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignInstructorInput {
    #[validate(custom(function = "required_id"))]
    pub instructor_id: StaffId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}

/// Student embedded in a course registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredStudentSummary {
    pub name: String,
    pub matric_number: String,
}

/// A student registered on a course for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredStudent {
    pub student_id: StudentId,
    pub student: RegisteredStudentSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CourseListParams {
    pub pagination: PaginationParams,
    pub department_id: Option<DepartmentId>,
    pub level: Option<u32>,
    pub semester: Option<Semester>,
}

impl CourseListParams {
    pub fn for_department(department_id: DepartmentId) -> Self {
        Self {
            department_id: Some(department_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = pagination;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_semester(mut self, semester: Semester) -> Self {
        self.semester = Some(semester);
        self
    }
}

impl QueryParams for CourseListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.pagination.query_pairs();
        push_opt(&mut pairs, "departmentId", self.department_id.as_ref());
        push_opt(&mut pairs, "level", self.level);
        push_opt(&mut pairs, "semester", self.semester);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_json(instructors: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "crs_1",
            "code": "CSC101",
            "title": "Introduction to Computing",
            "credits": 3,
            "departmentId": "dep_1",
            "level": 100,
            "semester": "FIRST",
            "academicYear": "2025/2026",
            "instructors": instructors
        })
    }

    #[test]
    fn test_course_defaults_to_active() {
        let course: Course = serde_json::from_value(course_json(serde_json::json!([]))).unwrap();
        assert!(course.is_active);
        assert_eq!(course.semester, Semester::First);
        assert!(course.primary_instructor().is_none());
    }

    #[test]
    fn test_primary_instructor_first_flagged_wins() {
        let course: Course = serde_json::from_value(course_json(serde_json::json!([
            {"id": "ci_1", "courseId": "crs_1", "instructorId": "staff_1", "isPrimary": false},
            {"id": "ci_2", "courseId": "crs_1", "instructorId": "staff_2", "isPrimary": true},
            {"id": "ci_3", "courseId": "crs_1", "instructorId": "staff_3", "isPrimary": true}
        ])))
        .unwrap();

        let primary = course.primary_instructor().unwrap();
        assert_eq!(primary.instructor_id, StaffId::new("staff_2"));
        assert_eq!(course.instructor_ids().count(), 3);
    }

    #[test]
    fn test_create_course_rules() {
        let input = CreateCourseInput {
            title: "Data Structures".to_string(),
            code: "CSC201".to_string(),
            description: None,
            credits: 0,
            department_id: DepartmentId::new("dep_1"),
            level: 50,
            semester: Semester::Second,
            academic_year: String::new(),
            is_active: None,
        };

        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn test_semester_parsing() {
        assert_eq!("second".parse::<Semester>().unwrap(), Semester::Second);
        assert_eq!("1".parse::<Semester>().unwrap(), Semester::First);
        assert!("third".parse::<Semester>().is_err());
        assert_eq!(Semester::Second.number(), 2);
    }

    #[test]
    fn test_course_list_params_pairs() {
        let params = CourseListParams::for_department(DepartmentId::new("dep_1"))
            .with_level(200)
            .with_semester(Semester::Second);
        assert_eq!(
            params.query_pairs(),
            vec![
                ("departmentId", "dep_1".to_string()),
                ("level", "200".to_string()),
                ("semester", "SECOND".to_string()),
            ]
        );
    }
}
