//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! separating record validation failures from backend (I/O, file format)
//! failures and from documents that no longer match their typed schema.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::core::Table;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Typed record <-> document conversion errors
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl StorageError {
    /// Returns true if this error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StorageError::Validation(_))
    }
}

/// Errors related to record validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is empty or blank.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A field holds a value outside its allowed domain.
    #[error("invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    /// The document handed to the store is not a JSON object.
    #[error("records stored in table '{table}' must be JSON objects")]
    NotAnObject { table: Table },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::MissingRequiredField`].
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidField`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by a storage backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backing file could not be read or written.
    #[error("{backend_name} I/O error on {path}: {source}")]
    Io {
        backend_name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a valid document database.
    #[error("{backend_name} data file {path} is corrupt: {message}")]
    CorruptDataFile {
        backend_name: String,
        path: String,
        message: String,
    },

    /// Internal backend error.
    #[error("{backend_name} internal error: {message}")]
    Internal {
        backend_name: String,
        message: String,
    },
}

/// Errors converting between typed records and stored documents.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// A typed record could not be turned into a document.
    #[error("failed to serialize record for table '{table}': {source}")]
    Encode {
        table: Table,
        #[source]
        source: serde_json::Error,
    },

    /// A stored document does not match the typed schema for its table.
    #[error("document {doc_id} in table '{table}' does not match its schema: {source}")]
    Decode {
        table: Table,
        doc_id: u64,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
