//! Course result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unirecords_core::QueryParams;
use unirecords_core::pagination::{PaginationParams, push_opt};
use unirecords_core::serde::deserialize_optional_f64;
use validator::Validate;

use crate::courses::Course;
use crate::ids::{CourseId, ResultId, SessionId, StudentId, required_id};
use crate::sessions::AcademicSession;
use crate::students::Student;

/// A student's score on one course in one session, graded by the backend
/// against the department's grade scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicResult {
    pub id: ResultId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub session_id: SessionId,
    pub score: f64,
    pub grade: String,
    pub grade_point: f64,
    #[serde(default)]
    pub student: Option<Box<Student>>,
    #[serde(default)]
    pub course: Option<Box<Course>>,
    #[serde(default)]
    pub session: Option<AcademicSession>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResultInput {
    #[validate(custom(function = "required_id"))]
    pub student_id: StudentId,
    #[validate(custom(function = "required_id"))]
    pub course_id: CourseId,
    #[validate(custom(function = "required_id"))]
    pub session_id: SessionId,
    #[validate(range(min = 0.0, max = 100.0, message = "Score must be between 0 and 100"))]
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResultInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0, message = "Score must be between 0 and 100"))]
    pub score: Option<f64>,
}

/// Wrapper validating every row of a bulk result upload.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BulkResultsInput {
    #[validate(length(min = 1, message = "Add at least one result"), nested)]
    pub results: Vec<CreateResultInput>,
}

/// `{ grade, gradePoint }` computed by the backend for a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCalculation {
    pub grade: String,
    pub grade_point: f64,
}

/// Results of one student for one semester with the semester GPA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResults {
    #[serde(default)]
    pub results: Vec<AcademicResult>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub total_credits: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResultListParams {
    pub pagination: PaginationParams,
    pub session_id: Option<SessionId>,
    pub course_id: Option<CourseId>,
    pub student_id: Option<StudentId>,
}

impl ResultListParams {
    pub fn for_course(course_id: CourseId, session_id: SessionId) -> Self {
        Self {
            course_id: Some(course_id),
            session_id: Some(session_id),
            ..Self::default()
        }
    }

    pub fn for_student(student_id: StudentId) -> Self {
        Self {
            student_id: Some(student_id),
            ..Self::default()
        }
    }
}

impl QueryParams for ResultListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.pagination.query_pairs();
        push_opt(&mut pairs, "sessionId", self.session_id.as_ref());
        push_opt(&mut pairs, "courseId", self.course_id.as_ref());
        push_opt(&mut pairs, "studentId", self.student_id.as_ref());
        pairs
    }
}
