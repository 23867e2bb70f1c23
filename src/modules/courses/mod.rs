//! Courses and their instructor assignments.

pub mod actions;
pub mod queries;
pub mod service;

pub use queries::CourseQueries;
pub use service::CourseService;

use crate::dashboard::Mutation;

pub(crate) const CREATE_COURSE: Mutation = Mutation::new(
    "course",
    "create",
    "Course created successfully",
    "Failed to create course",
);
pub(crate) const UPDATE_COURSE: Mutation = Mutation::new(
    "course",
    "update",
    "Course updated successfully",
    "Failed to update course",
);
pub(crate) const DELETE_COURSE: Mutation = Mutation::new(
    "course",
    "delete",
    "Course deleted successfully",
    "Failed to delete course",
);
pub(crate) const ASSIGN_INSTRUCTOR: Mutation = Mutation::new(
    "course",
    "assign_instructor",
    "Instructor assigned successfully",
    "Failed to assign instructor",
);
pub(crate) const REMOVE_INSTRUCTOR: Mutation = Mutation::new(
    "course",
    "remove_instructor",
    "Instructor removed successfully",
    "Failed to remove instructor",
);
