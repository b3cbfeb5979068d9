//! Easy EMR Persistence Layer
//!
//! This crate stores the records of the Easy EMR backend: user accounts,
//! patients, clinical records, billing and the request audit trail. Records
//! are schemaless JSON documents grouped into named tables; the typed models
//! and the [`Repository`](crud::Repository) sit on top and are what the REST
//! layer talks to.
//!
//! # Backend Features
//!
//! - `json-file` (default) - a single JSON file in TinyDB's layout
//!   (`{"<table>": {"<doc_id>": {...}}}`), rewritten atomically on each insert
//! - the in-memory backend is always available
//!
//! # Architecture
//!
//! - [`core`] - the [`DocumentStore`](core::DocumentStore) trait, tables and queries
//! - [`backends`] - memory and JSON file stores
//! - [`models`] - typed records and their validation rules
//! - [`crud`] - typed add / get / list operations and audit queries
//! - [`types`] - document ids and pagination
//! - [`error`] - error types for all operations
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use easy_emr_persistence::backends::memory::MemoryStore;
//! use easy_emr_persistence::crud::Repository;
//! use easy_emr_persistence::models::Patient;
//!
//! # tokio_test::block_on(async {
//! let repo = Repository::new(Arc::new(MemoryStore::new()));
//!
//! let patient = Patient {
//!     id: "p1".to_string(),
//!     first_name: "John".to_string(),
//!     last_name: "Doe".to_string(),
//!     dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
//!     gender: "male".to_string(),
//!     insurance: None,
//! };
//! repo.add_patient(&patient).await.unwrap();
//!
//! let found = repo.get_patient_by_id("p1").await.unwrap();
//! assert_eq!(found, Some(patient));
//! # });
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod crud;
pub mod error;
pub mod models;
pub mod types;

// Re-export commonly used types at crate root
pub use crud::{AuditFilter, Repository};
pub use error::{StorageError, StorageResult, ValidationError};
pub use types::{DocId, Document, Page, Paginated};

// Re-export core traits
pub use core::{BackendKind, DocumentStore, Table};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
