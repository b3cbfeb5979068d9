//! Request audit entries.

use serde::{Deserialize, Serialize};

use super::{Record, require_non_blank};
use crate::core::Table;
use crate::error::ValidationError;

/// One HTTP request as recorded by the audit middleware.
///
/// Audit entries have no identifier of their own; their order is the
/// `doc_id` the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Request path, without the query string.
    pub path: String,
    /// HTTP method.
    pub method: String,
    /// Response status code.
    pub status_code: u16,
    /// Time spent handling the request, in seconds.
    pub duration: f64,
}

impl Record for AuditLogEntry {
    const TABLE: Table = Table::Audit;
    const NAME: &'static str = "Audit log";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("path", &self.path)?;
        require_non_blank("method", &self.method)?;
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ValidationError::invalid(
                "duration",
                "must be a non-negative number of seconds",
            ));
        }
        Ok(())
    }
}
