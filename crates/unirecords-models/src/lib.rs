//! # UniRecords Models
//!
//! Entities, inputs and list parameters exchanged with the records backend.
//!
//! Entities mirror the backend's camelCase JSON. Inputs carry `validator`
//! rules that are checked before a request is sent. List parameter structs
//! implement [`unirecords_core::QueryParams`], which makes them usable both as
//! query strings and as cache-key segments.
//!
//! # Modules
//!
//! - [`ids`]: String-backed id newtypes
//! - [`common`]: Embedded users, acknowledgements, bulk upload reports, export formats
//! - [`governance`]: Faculties, departments, grade scales
//! - [`courses`]: Courses and instructor assignments
//! - [`staff`]: Staff records and statistics
//! - [`students`]: Student records, promotions
//! - [`results`]: Course results and grade calculation
//! - [`sessions`]: Academic sessions
//! - [`admin`]: User administration, dashboard statistics, audit logs
//!
//! # Example
//!
//! ```ignore
//! use unirecords_models::{CreateDepartmentInput, FacultyId};
//! use validator::Validate;
//!
//! let input = CreateDepartmentInput::new("Physics", "PHY", FacultyId::new("fac_1"));
//! input.validate()?;
//! ```

pub mod admin;
pub mod common;
pub mod courses;
pub mod governance;
pub mod ids;
pub mod results;
pub mod sessions;
pub mod staff;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use ids::{
    AuditLogId, CourseId, DepartmentId, FacultyId, GradeScaleId, ResultId, SessionId, StaffId,
    StudentId, UserId,
};

pub use common::{
    BulkUploadError, BulkUploadResult, CountResponse, ExportFormat, ParseValueError,
    SuccessResponse, UserSummary, parse_select, select_value,
};

pub use governance::{
    CreateDepartmentInput, CreateFacultyInput, CreateGradeScaleInput, Department,
    DepartmentCounts, DepartmentListParams, DepartmentStats, Faculty, FacultyCounts,
    FacultyListParams, GradeScale, Level, UpdateDepartmentInput, UpdateFacultyInput,
};

pub use courses::{
    AssignInstructorInput, Course, CourseInstructor, CourseListParams, CreateCourseInput,
    InstructorProfile, RegisteredStudent, Semester, UpdateCourseInput,
};

pub use staff::{
    CreateStaffInput, EmploymentType, Staff, StaffListParams, StaffStats, UpdateStaffInput,
};

pub use students::{
    BulkPromoteInput, CreateStudentInput, Student, StudentListParams, StudentStatus,
    UpdateStudentInput,
};

pub use results::{
    AcademicResult, BulkResultsInput, CreateResultInput, GradeCalculation, ResultListParams,
    SemesterResults, UpdateResultInput,
};

pub use sessions::{AcademicSession, CreateSessionInput, SessionListParams, UpdateSessionInput};

pub use admin::{
    AdminStats, AdminUser, AdminUserListParams, AuditLog, AuditLogListParams, BanUserInput,
    CreateUserInput, UpdateUserInput, UserRole,
};
