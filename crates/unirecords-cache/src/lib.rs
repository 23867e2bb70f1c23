//! # UniRecords Cache
//!
//! Client-side query caching for the UniRecords dashboard.
//!
//! This crate provides:
//! - Hierarchical query keys for every resource family ([`keys`])
//! - An in-process query cache with request de-duplication and
//!   prefix invalidation ([`QueryClient`])
//! - View-state derivation from query results ([`QueryStatus`])
//!
//! # Example
//!
//! ```ignore
//! use unirecords_cache::{QueryClient, keys};
//! use unirecords_config::QueryCacheConfig;
//!
//! let client = QueryClient::new(QueryCacheConfig::from_env());
//!
//! let params = FacultyListParams::default();
//! let faculties = client
//!     .fetch(keys::faculties::list(&params), || GovernanceService::list_faculties(&api, &params))
//!     .await?;
//!
//! // After creating a faculty
//! client.invalidate(&keys::faculties::lists());
//! ```

pub mod client;
pub mod keys;
mod lock;
pub mod status;

pub use client::{QueryClient, QueryState};
pub use keys::{KeySegment, QueryKey, ResourceFamily};
pub use status::{Collection, QueryStatus};
