//! HTTP request handlers.
//!
//! - [`health`] - Root and health endpoints
//! - [`metrics`] - Prometheus exposition
//! - [`patients`] - Patient create/read/list
//! - [`audit`] - Audit log retrieval
//! - [`auth`] - Login and signup
//! - [`demo`] - Demo user creation
//! - [`users`] - Current user and admin user listing
//! - [`records`] - Role-guarded clinical and financial records

pub mod audit;
pub mod auth;
pub mod demo;
pub mod health;
pub mod metrics;
pub mod patients;
pub mod records;
pub mod users;

// Re-export handlers for convenience
pub use audit::audit_logs_handler;
pub use auth::{signup_handler, token_handler};
pub use demo::create_demo_user_handler;
pub use health::{health_handler, root_handler};
pub use metrics::metrics_handler;
pub use patients::{create_patient_handler, list_patients_handler, read_patient_handler};
pub use records::{create_record_handler, list_records_handler, read_record_handler};
pub use users::{list_users_handler, me_handler};
