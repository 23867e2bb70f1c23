//! Faculty and department models.
//!
//! Faculties own departments; departments own grade scales and levels. Codes
//! are the human-facing identifiers used in dashboard routes, ids are what
//! the backend uses in every mutation path.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unirecords_core::QueryParams;
use unirecords_core::pagination::{PaginationParams, push_opt};
use unirecords_core::serde::deserialize_optional_string;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::UserSummary;
use crate::courses::Course;
use crate::ids::{DepartmentId, FacultyId, GradeScaleId, UserId, required_id};

/// Derived counts attached to a faculty by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyCounts {
    #[serde(default)]
    pub departments: u32,
    #[serde(default)]
    pub users: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    pub code: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default)]
    pub dean_id: Option<UserId>,
    #[serde(default)]
    pub dean: Option<UserSummary>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default, rename = "_count")]
    pub counts: Option<FacultyCounts>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Derived counts attached to a department by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCounts {
    #[serde(default)]
    pub courses: u32,
    #[serde(default)]
    pub students: u32,
    #[serde(default)]
    pub staff: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    pub faculty_id: FacultyId,
    #[serde(default)]
    pub hod_id: Option<UserId>,
    /// Programme duration in years.
    #[serde(default)]
    pub number_of_years: Option<u32>,
    #[serde(default)]
    pub faculty: Option<Box<Faculty>>,
    #[serde(default)]
    pub hod: Option<UserSummary>,
    #[serde(default)]
    pub grade_scales: Vec<GradeScale>,
    #[serde(default)]
    pub levels: Vec<Level>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default, rename = "_count")]
    pub counts: Option<DepartmentCounts>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Department {
    /// The grade scale entry whose range contains `score`.
    ///
    /// Ranges are inclusive on both ends. Overlap between ranges is not
    /// checked here; when ranges overlap the first matching entry in backend
    /// order wins.
    pub fn grade_for_score(&self, score: f64) -> Option<&GradeScale> {
        self.grade_scales.iter().find(|scale| scale.contains(score))
    }

    pub fn has_hod(&self) -> bool {
        self.hod_id.is_some() || self.hod.is_some()
    }
}

/// One row of a department's grading table: a score range mapped to a grade
/// label and grade point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeScale {
    pub id: GradeScaleId,
    pub grade: String,
    pub min_score: f64,
    pub max_score: f64,
    pub grade_point: f64,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    pub department_id: DepartmentId,
}

impl GradeScale {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min_score && score <= self.max_score
    }
}

/// A year of study within a department (100 level, 200 level, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: String,
    pub name: String,
    pub value: u32,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStats {
    pub total: u32,
    pub with_hod: u32,
    pub without_hod: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacultyInput {
    #[validate(length(min = 1, message = "Faculty name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Faculty code is required"))]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dean_id: Option<UserId>,
}

impl CreateFacultyInput {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: None,
            dean_id: None,
        }
    }
}

/// Partial update; only provided fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacultyInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Faculty name is required"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Faculty code is required"))]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dean_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentInput {
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Department code is required"))]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(custom(function = "required_id"))]
    pub faculty_id: FacultyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Number of years must be at least 1"))]
    pub number_of_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hod_id: Option<UserId>,
}

impl CreateDepartmentInput {
    /// A department input with the dashboard's default four-year programme.
    pub fn new(name: impl Into<String>, code: impl Into<String>, faculty_id: FacultyId) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: None,
            faculty_id,
            number_of_years: Some(4),
            hod_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Department code is required"))]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Moving a department to another faculty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "required_id"))]
    pub faculty_id: Option<FacultyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Number of years must be at least 1"))]
    pub number_of_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hod_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradeScaleInput {
    pub grade: String,
    pub min_score: f64,
    pub max_score: f64,
    pub grade_point: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

// Written by hand: the min/max comparison belongs to the min_score field.
impl Validate for CreateGradeScaleInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.grade.trim().is_empty() {
            errors.add("grade", rule("required", "Grade is required"));
        }
        if !(0.0..=100.0).contains(&self.min_score) {
            errors.add("min_score", rule("range", "Min score must be between 0 and 100"));
        }
        if !(0.0..=100.0).contains(&self.max_score) {
            errors.add("max_score", rule("range", "Max score must be between 0 and 100"));
        }
        if self.min_score > self.max_score {
            errors.add(
                "min_score",
                rule("min_above_max", "Min score cannot be greater than max score"),
            );
        }
        if self.grade_point < 0.0 || self.grade_point.is_nan() {
            errors.add("grade_point", rule("range", "Grade point cannot be negative"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Parameters for the faculty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FacultyListParams {
    pub pagination: PaginationParams,
}

impl FacultyListParams {
    pub fn new(pagination: PaginationParams) -> Self {
        Self { pagination }
    }
}

impl QueryParams for FacultyListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.pagination.query_pairs()
    }
}

/// Parameters for the department list, optionally scoped to one faculty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DepartmentListParams {
    pub pagination: PaginationParams,
    pub faculty_id: Option<FacultyId>,
}

impl DepartmentListParams {
    pub fn for_faculty(faculty_id: FacultyId) -> Self {
        Self {
            faculty_id: Some(faculty_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = pagination;
        self
    }
}

impl QueryParams for DepartmentListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.pagination.query_pairs();
        push_opt(&mut pairs, "facultyId", self.faculty_id.as_ref());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(grade: &str, min: f64, max: f64, point: f64) -> GradeScale {
        GradeScale {
            id: GradeScaleId::new(format!("gs_{grade}")),
            grade: grade.to_string(),
            min_score: min,
            max_score: max,
            grade_point: point,
            description: None,
            department_id: DepartmentId::new("dep_1"),
        }
    }

    fn department(scales: Vec<GradeScale>) -> Department {
        serde_json::from_value::<Department>(serde_json::json!({
            "id": "dep_1",
            "name": "Computer Science",
            "code": "CSC",
            "facultyId": "fac_1"
        }))
        .map(|mut d| {
            d.grade_scales = scales;
            d
        })
        .unwrap()
    }

    #[test]
    fn test_department_deserializes_counts_and_hod() {
        let json = r#"{
            "id": "dep_1", "name": "Computer Science", "code": "CSC",
            "description": "", "facultyId": "fac_1", "hodId": "staff_9",
            "numberOfYears": 4,
            "hod": {"id": "staff_9", "name": "Dr. Ada", "email": "ada@uni.edu"},
            "_count": {"courses": 12, "students": 340, "staff": 18},
            "createdAt": "2025-01-10T09:00:00Z"
        }"#;
        let dep: Department = serde_json::from_str(json).unwrap();

        assert_eq!(dep.description, None);
        assert_eq!(dep.hod_id, Some(UserId::new("staff_9")));
        assert_eq!(dep.counts.unwrap().students, 340);
        assert!(dep.has_hod());
        assert!(dep.grade_scales.is_empty());
    }

    #[test]
    fn test_grade_for_score_uses_inclusive_ranges() {
        let dep = department(vec![
            scale("A", 70.0, 100.0, 5.0),
            scale("B", 60.0, 69.0, 4.0),
            scale("F", 0.0, 39.0, 0.0),
        ]);

        assert_eq!(dep.grade_for_score(70.0).map(|s| s.grade.as_str()), Some("A"));
        assert_eq!(dep.grade_for_score(69.0).map(|s| s.grade.as_str()), Some("B"));
        assert_eq!(dep.grade_for_score(45.0), None);
    }

    #[test]
    fn test_grade_for_score_first_match_wins_on_overlap() {
        let dep = department(vec![scale("A", 65.0, 100.0, 5.0), scale("B", 60.0, 69.0, 4.0)]);
        assert_eq!(dep.grade_for_score(67.0).map(|s| s.grade.as_str()), Some("A"));
    }

    #[test]
    fn test_create_faculty_requires_name_and_code() {
        let errors = CreateFacultyInput::new("", "").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("code"));

        assert!(CreateFacultyInput::new("Faculty of Science", "FOS").validate().is_ok());
    }

    #[test]
    fn test_create_faculty_omits_absent_fields() {
        let body = serde_json::to_value(CreateFacultyInput::new("Faculty of Science", "FOS")).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Faculty of Science", "code": "FOS"}));
    }

    #[test]
    fn test_create_department_rules() {
        let mut input = CreateDepartmentInput::new("Physics", "PHY", FacultyId::new(""));
        input.number_of_years = Some(0);

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 2);

        let input = CreateDepartmentInput::new("Physics", "PHY", FacultyId::new("fac_1"));
        assert!(input.validate().is_ok());
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["facultyId"], "fac_1");
        assert_eq!(body["numberOfYears"], 4);
    }

    #[test]
    fn test_grade_scale_rejects_inverted_range() {
        let input = CreateGradeScaleInput {
            grade: "A".to_string(),
            min_score: 80.0,
            max_score: 70.0,
            grade_point: 5.0,
            description: None,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("min_score"));
    }

    #[test]
    fn test_grade_scale_bounds() {
        let input = CreateGradeScaleInput {
            grade: " ".to_string(),
            min_score: -1.0,
            max_score: 101.0,
            grade_point: -0.5,
            description: None,
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 4);
    }

    #[test]
    fn test_department_list_params_pairs() {
        let params = DepartmentListParams::for_faculty(FacultyId::new("fac_1"))
            .with_pagination(PaginationParams::page(2));
        assert_eq!(
            params.query_pairs(),
            vec![("page", "2".to_string()), ("facultyId", "fac_1".to_string())]
        );
        assert!(DepartmentListParams::default().query_pairs().is_empty());
    }
}
