//! Typed EMR records.
//!
//! Each model is a plain serde struct whose JSON form is the document stored
//! in its table. Calendar dates are `chrono::NaiveDate`, which serializes as
//! an ISO-8601 `YYYY-MM-DD` string and is parsed back on read, so the
//! date-to-string conversion lives in the derives rather than in the CRUD
//! code.
//!
//! Reference fields (`patient_id`, `physician_id`, `order_id`, ...) are plain
//! strings; nothing checks that the referenced record exists.

mod appointment;
mod audit;
mod billing;
mod encounter;
mod lab;
mod patient;
mod prescription;
mod user;

pub use appointment::Appointment;
pub use audit::AuditLogEntry;
pub use billing::BillingRecord;
pub use encounter::{Encounter, SoapNotes};
pub use lab::{LabOrder, LabOrderStatus, LabResult};
pub use patient::Patient;
pub use prescription::Prescription;
pub use user::{Role, User, UserProfile};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::Table;
use crate::error::{SerializationError, StorageResult, ValidationError};
use crate::types::Document;

/// A typed record stored in one table of the document store.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    /// The table holding records of this type.
    const TABLE: Table;

    /// Human-readable record name used in error messages ("Patient").
    const NAME: &'static str;

    /// Checks field-level constraints before the record is stored.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Encodes the record as the document written to the store.
    fn to_document(&self) -> StorageResult<Value> {
        serde_json::to_value(self).map_err(|source| {
            SerializationError::Encode {
                table: Self::TABLE,
                source,
            }
            .into()
        })
    }

    /// Decodes a stored document back into the typed record.
    fn from_document(document: Document) -> StorageResult<Self> {
        let doc_id = document.doc_id();
        serde_json::from_value(document.into_content()).map_err(|source| {
            SerializationError::Decode {
                table: Self::TABLE,
                doc_id,
                source,
            }
            .into()
        })
    }
}

/// A record with a caller-supplied string identifier.
pub trait Identifiable: Record {
    /// Returns the record's identifier.
    fn id(&self) -> &str;
}

/// Fails with `MissingRequiredField` if `value` is empty or only whitespace.
pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::missing(field))
    } else {
        Ok(())
    }
}
