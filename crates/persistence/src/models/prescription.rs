//! Medication orders.

use serde::{Deserialize, Serialize};

use super::{Identifiable, Record, require_non_blank};
use crate::core::Table;
use crate::error::ValidationError;

/// A prescription written by a physician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    /// Record identifier.
    pub id: String,
    /// Patient reference.
    pub patient_id: String,
    /// Prescribing physician (user) reference.
    pub physician_id: String,
    /// Drug name.
    pub medication: String,
    /// Amount per administration ("500 mg").
    pub dosage: String,
    /// Administration schedule ("twice daily").
    pub frequency: String,
}

impl Record for Prescription {
    const TABLE: Table = Table::Prescriptions;
    const NAME: &'static str = "Prescription";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("id", &self.id)?;
        require_non_blank("patient_id", &self.patient_id)?;
        require_non_blank("physician_id", &self.physician_id)?;
        require_non_blank("medication", &self.medication)?;
        require_non_blank("dosage", &self.dosage)?;
        require_non_blank("frequency", &self.frequency)
    }
}

impl Identifiable for Prescription {
    fn id(&self) -> &str {
        &self.id
    }
}
