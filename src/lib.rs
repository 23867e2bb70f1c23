//! # UniRecords
//!
//! Client-side data layer for the university records admin dashboard.
//!
//! ## Overview
//!
//! The dashboard never talks to the database. Every read and write goes to
//! the records backend over HTTP, and this crate provides the layers in
//! between:
//!
//! - **Services**: One unit struct per resource whose associated functions
//!   map to exactly one backend endpoint each
//! - **Queries**: Cached reads and invalidating writes behind [`Dashboard`]
//! - **Actions**: Server-side writes that return a serializable
//!   [`ActionResult`] and mark dashboard pages for regeneration
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── unirecords-core/     # ApiError, pagination envelope, query params
//! ├── unirecords-config/   # Client, cache and logging configuration
//! ├── unirecords-models/   # Entities, inputs, list parameters
//! ├── unirecords-cache/    # QueryKey hierarchy and the QueryClient
//! └── unirecords-cli/      # Operator command line
//! src/
//! ├── api.rs               # Authenticated HTTP client
//! ├── dashboard.rs         # Query and mutation layer
//! ├── actions.rs           # Server action layer
//! ├── modules/             # One directory per resource
//! │   ├── governance/     # Faculties, departments, grade scales
//! │   ├── courses/        # Courses and instructors
//! │   ├── staff/          # Staff records, bulk upload, export
//! │   ├── students/       # Student records, promotion, transcripts
//! │   ├── results/        # Course results
//! │   ├── sessions/       # Academic sessions
//! │   └── admin/          # Users, dashboard totals, audit logs
//! └── routes.rs            # Dashboard page paths
//! ```
//!
//! Each resource module follows the same layout:
//!
//! - `mod.rs`: Exports and the mutation descriptors shared by both write paths
//! - `service.rs`: Endpoint calls
//! - `queries.rs`: Cached reads and cache-invalidating writes
//! - `actions.rs`: Server actions
//!
//! ## Cache keys
//!
//! Keys are hierarchical. Invalidating a prefix marks every cached query
//! beneath it stale, so a write only needs to name the broadest prefix its
//! change can affect:
//!
//! ```text
//! ["governance", "departments"]                                  all
//! ["governance", "departments", "list"]                          lists
//! ["governance", "departments", "list", {"facultyId": "fac_1"}]  one list
//! ["governance", "departments", "detail", "dep_1"]               one record
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! UNIRECORDS_API_URL=http://localhost:8000
//! UNIRECORDS_API_TOKEN=your-session-token
//! QUERY_STALE_SECONDS=0
//! ```
//!
//! ```ignore
//! use unirecords::Dashboard;
//! use unirecords::unirecords_config::{ClientConfig, QueryCacheConfig};
//! use unirecords::unirecords_models::FacultyListParams;
//!
//! let dashboard = Dashboard::from_config(&ClientConfig::from_env(), QueryCacheConfig::from_env())?;
//! let faculties = dashboard.governance().faculties(&FacultyListParams::default()).await?;
//! ```
//!
//! ## Modules
//!
//! - [`actions`]: Server actions and path revalidation
//! - [`api`]: Authenticated HTTP client
//! - [`dashboard`]: Query and mutation layer
//! - [`logging`]: Tracing subscriber setup
//! - [`metrics`]: Request and mutation counters
//! - [`modules`]: Resource services, queries and actions
//! - [`notify`]: Success and error notifications
//! - [`routes`]: Dashboard page paths

pub mod actions;
pub mod api;
pub mod dashboard;
pub mod logging;
pub mod metrics;
pub mod modules;
pub mod notify;
pub mod routes;

pub use actions::{ActionResult, Actions, PathRevalidator, Revalidator};
pub use api::{ApiClient, Endpoint};
pub use dashboard::{Dashboard, Mutation};
pub use notify::{Notification, NotificationKind, Notifier, RecordingNotifier, TracingNotifier};

// Re-export workspace crates for convenience
pub use unirecords_cache;
pub use unirecords_config;
pub use unirecords_core;
pub use unirecords_models;
