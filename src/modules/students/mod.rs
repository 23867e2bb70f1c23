//! Student records.

pub mod actions;
pub mod queries;
pub mod service;

pub use queries::StudentQueries;
pub use service::StudentService;

use crate::dashboard::Mutation;

pub(crate) const CREATE_STUDENT: Mutation = Mutation::new(
    "student",
    "create",
    "Student created successfully",
    "Failed to create student",
);
pub(crate) const UPDATE_STUDENT: Mutation = Mutation::new(
    "student",
    "update",
    "Student updated successfully",
    "Failed to update student",
);
pub(crate) const DELETE_STUDENT: Mutation = Mutation::new(
    "student",
    "delete",
    "Student deleted successfully",
    "Failed to delete student",
);
pub(crate) const PROMOTE_STUDENT: Mutation = Mutation::new(
    "student",
    "promote",
    "Student promoted successfully",
    "Failed to promote student",
);
pub(crate) const UPDATE_STUDENT_STATUS: Mutation = Mutation::new(
    "student",
    "update_status",
    "Student status updated successfully",
    "Failed to update student status",
);
pub(crate) const BULK_PROMOTE_STUDENTS: Mutation = Mutation::new(
    "student",
    "bulk_promote",
    "Students promoted successfully",
    "Failed to promote students",
);
pub(crate) const BULK_UPLOAD_STUDENTS: Mutation = Mutation::new(
    "student",
    "bulk_upload",
    "Students uploaded successfully",
    "Failed to upload file",
);
