//! HTTP middleware for the EMR REST API.
//!
//! - [`audit`] - Per-request audit log, structured log line and metrics

pub mod audit;

pub use audit::{METRICS_PATH, audit_middleware};
