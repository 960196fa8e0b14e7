//! Course catalogue backend.
//!
//! The crate follows a hexagonal layout: `domain` holds the course model,
//! validation rules, services and ports; `inbound` exposes the HTTP adapter;
//! `outbound` provides the repository adapters; `load_test` drives a running
//! server through the public API and reports on it.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod load_test;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
