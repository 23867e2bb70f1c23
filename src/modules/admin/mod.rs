//! User administration, dashboard totals and audit logs.

pub mod actions;
pub mod queries;
pub mod service;

pub use queries::AdminQueries;
pub use service::AdminService;

use crate::dashboard::Mutation;

pub(crate) const CREATE_USER: Mutation = Mutation::new(
    "user",
    "create",
    "User created successfully",
    "Failed to create user",
);
pub(crate) const UPDATE_USER: Mutation = Mutation::new(
    "user",
    "update",
    "User updated successfully",
    "Failed to update user",
);
pub(crate) const DELETE_USER: Mutation = Mutation::new(
    "user",
    "delete",
    "User deleted successfully",
    "Failed to delete user",
);
pub(crate) const BAN_USER: Mutation = Mutation::new(
    "user",
    "ban",
    "User banned successfully",
    "Failed to ban user",
);
pub(crate) const UNBAN_USER: Mutation = Mutation::new(
    "user",
    "unban",
    "User unbanned successfully",
    "Failed to unban user",
);
pub(crate) const IMPERSONATE_USER: Mutation = Mutation::new(
    "user",
    "impersonate",
    "Now impersonating user",
    "Failed to impersonate user",
);
pub(crate) const STOP_IMPERSONATION: Mutation = Mutation::new(
    "user",
    "stop_impersonation",
    "Stopped impersonating user",
    "Failed to stop impersonation",
);
