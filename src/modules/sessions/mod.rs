//! Academic sessions.

pub mod actions;
pub mod queries;
pub mod service;

pub use queries::SessionQueries;
pub use service::SessionService;

use crate::dashboard::Mutation;

pub(crate) const CREATE_SESSION: Mutation = Mutation::new(
    "session",
    "create",
    "Session created successfully",
    "Failed to create session",
);
pub(crate) const UPDATE_SESSION: Mutation = Mutation::new(
    "session",
    "update",
    "Session updated successfully",
    "Failed to update session",
);
pub(crate) const DELETE_SESSION: Mutation = Mutation::new(
    "session",
    "delete",
    "Session deleted successfully",
    "Failed to delete session",
);
pub(crate) const ACTIVATE_SESSION: Mutation = Mutation::new(
    "session",
    "activate",
    "Session activated successfully",
    "Failed to activate session",
);
