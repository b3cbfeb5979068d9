//! Axum extractors for EMR request data.
//!
//! - [`JsonBody`] - Any JSON payload, with 400 rejections
//! - [`RecordBody`] - A typed, validated record
//! - [`AuditQuery`] - Audit log filters and pagination
//!
//! The authentication extractors live in [`crate::auth`].

mod audit_query;
mod record_body;

pub use audit_query::AuditQuery;
pub use record_body::{JsonBody, RecordBody};
