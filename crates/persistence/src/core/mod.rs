//! Core storage traits and abstractions.
//!
//! - [`DocumentStore`] - the insert / get / all contract every backend provides
//! - [`Table`] - the named tables of the EMR data file
//! - [`Query`] - field-equality predicates used by `get` and `search`
//! - [`BackendKind`] - runtime backend identification

pub mod backend;
pub mod query;
pub mod storage;
pub mod table;

pub use backend::BackendKind;
pub use query::{FieldQuery, Query};
pub use storage::DocumentStore;
pub use table::Table;
