//! Faculties and departments.

pub mod actions;
pub mod queries;
pub mod service;

pub use queries::GovernanceQueries;
pub use service::GovernanceService;

use crate::dashboard::Mutation;

pub(crate) const CREATE_FACULTY: Mutation = Mutation::new(
    "faculty",
    "create",
    "Faculty created successfully",
    "Failed to create faculty",
);
pub(crate) const UPDATE_FACULTY: Mutation = Mutation::new(
    "faculty",
    "update",
    "Faculty updated successfully",
    "Failed to update faculty",
);
pub(crate) const DELETE_FACULTY: Mutation = Mutation::new(
    "faculty",
    "delete",
    "Faculty deleted successfully",
    "Failed to delete faculty",
);
pub(crate) const ASSIGN_DEAN: Mutation = Mutation::new(
    "faculty",
    "assign_dean",
    "Dean assigned successfully",
    "Failed to assign dean",
);
pub(crate) const CREATE_DEPARTMENT: Mutation = Mutation::new(
    "department",
    "create",
    "Department created successfully",
    "Failed to create department",
);
pub(crate) const UPDATE_DEPARTMENT: Mutation = Mutation::new(
    "department",
    "update",
    "Department updated successfully",
    "Failed to update department",
);
pub(crate) const DELETE_DEPARTMENT: Mutation = Mutation::new(
    "department",
    "delete",
    "Department deleted successfully",
    "Failed to delete department",
);
pub(crate) const ASSIGN_HOD: Mutation = Mutation::new(
    "department",
    "assign_hod",
    "HOD assigned successfully",
    "Failed to assign HOD",
);
pub(crate) const ADD_GRADE_SCALE: Mutation = Mutation::new(
    "department",
    "add_grade_scale",
    "Grade scale added successfully",
    "Failed to add grade scale",
);
