//! Laboratory orders and results.

use serde::{Deserialize, Serialize};

use super::{Identifiable, Record, require_non_blank};
use crate::core::Table;
use crate::error::ValidationError;

/// Lifecycle of a lab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabOrderStatus {
    /// Ordered, no result yet.
    #[default]
    Pending,
    /// Result available.
    Completed,
}

/// A laboratory test order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabOrder {
    /// Record identifier.
    pub id: String,
    /// Patient reference.
    pub patient_id: String,
    /// Name of the ordered test.
    pub test_name: String,
    /// Order status.
    #[serde(default)]
    pub status: LabOrderStatus,
}

impl Record for LabOrder {
    const TABLE: Table = Table::LabOrders;
    const NAME: &'static str = "Lab order";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("id", &self.id)?;
        require_non_blank("patient_id", &self.patient_id)?;
        require_non_blank("test_name", &self.test_name)
    }
}

impl Identifiable for LabOrder {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The result of a lab order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    /// Record identifier.
    pub id: String,
    /// Lab order reference.
    pub order_id: String,
    /// Result text.
    pub result: String,
    /// Path of an attached report file.
    #[serde(default)]
    pub file_path: Option<String>,
}

impl Record for LabResult {
    const TABLE: Table = Table::LabResults;
    const NAME: &'static str = "Lab result";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("id", &self.id)?;
        require_non_blank("order_id", &self.order_id)?;
        require_non_blank("result", &self.result)
    }
}

impl Identifiable for LabResult {
    fn id(&self) -> &str {
        &self.id
    }
}
