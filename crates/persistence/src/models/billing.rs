//! Billing records.

use serde::{Deserialize, Serialize};

use super::{Identifiable, Record, require_non_blank};
use crate::core::Table;
use crate::error::ValidationError;

/// A charge for an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Record identifier.
    pub id: String,
    /// Patient reference.
    pub patient_id: String,
    /// Encounter reference.
    pub encounter_id: String,
    /// Amount charged.
    pub amount: f64,
    /// Whether the charge has been settled.
    #[serde(default)]
    pub paid: bool,
}

impl Record for BillingRecord {
    const TABLE: Table = Table::Billing;
    const NAME: &'static str = "Billing record";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("id", &self.id)?;
        require_non_blank("patient_id", &self.patient_id)?;
        require_non_blank("encounter_id", &self.encounter_id)?;
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ValidationError::invalid(
                "amount",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

impl Identifiable for BillingRecord {
    fn id(&self) -> &str {
        &self.id
    }
}
