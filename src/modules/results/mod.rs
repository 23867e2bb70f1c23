//! Course results and grade calculation.

pub mod actions;
pub mod queries;
pub mod service;

pub use queries::ResultQueries;
pub use service::ResultService;

use crate::dashboard::Mutation;

pub(crate) const CREATE_RESULT: Mutation = Mutation::new(
    "result",
    "create",
    "Result created successfully",
    "Failed to create result",
);
pub(crate) const CREATE_BULK_RESULTS: Mutation = Mutation::new(
    "result",
    "bulk_create",
    "Results uploaded successfully",
    "Failed to upload results",
);
pub(crate) const UPDATE_RESULT: Mutation = Mutation::new(
    "result",
    "update",
    "Result updated successfully",
    "Failed to update result",
);
pub(crate) const DELETE_RESULT: Mutation = Mutation::new(
    "result",
    "delete",
    "Result deleted successfully",
    "Failed to delete result",
);
