//! # UniRecords Core
//!
//! Core types, errors, and utilities shared by every UniRecords crate.
//!
//! - [`errors`]: The structured error every backend call can fail with
//! - [`pagination`]: Pagination parameters, list envelopes and the
//!   [`QueryParams`] trait used to build both query strings and cache keys
//! - [`serde`]: Custom serde helpers for loosely typed backend payloads
//!
//! # Example
//!
//! ```ignore
//! use unirecords_core::{ApiError, PaginationParams, QueryParams};
//!
//! let params = PaginationParams::page(2).with_limit(20);
//! assert_eq!(params.query_pairs(), vec![("page", "2".into()), ("limit", "20".into())]);
//!
//! let error = ApiError::from_response(404, br#"{"message":"Faculty not found"}"#);
//! assert!(error.is_not_found());
//! ```

pub mod errors;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{ApiError, FieldErrors};
pub use pagination::{PaginatedResponse, PaginationMeta, PaginationParams, QueryParams, SortOrder};
