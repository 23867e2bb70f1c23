//! Staff records.

pub mod actions;
pub mod queries;
pub mod service;

pub use queries::StaffQueries;
pub use service::StaffService;

use crate::dashboard::Mutation;

pub(crate) const CREATE_STAFF: Mutation = Mutation::new(
    "staff",
    "create",
    "Staff created successfully",
    "Failed to create staff",
);
pub(crate) const UPDATE_STAFF: Mutation = Mutation::new(
    "staff",
    "update",
    "Staff updated successfully",
    "Failed to update staff",
);
pub(crate) const DELETE_STAFF: Mutation = Mutation::new(
    "staff",
    "delete",
    "Staff deleted successfully",
    "Failed to delete staff",
);
pub(crate) const BULK_UPLOAD_STAFF: Mutation = Mutation::new(
    "staff",
    "bulk_upload",
    "Staff uploaded successfully",
    "Failed to upload file",
);
