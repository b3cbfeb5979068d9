//! Clinical encounters.

use serde::{Deserialize, Serialize};

use super::{Identifiable, Record, require_non_blank};
use crate::core::Table;
use crate::error::ValidationError;

/// SOAP-structured clinical note.
///
/// The single-letter keys `S`, `O`, `A` and `P` are accepted on input; the
/// long names are always written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoapNotes {
    /// What the patient reports.
    #[serde(default, alias = "S")]
    pub subjective: String,
    /// What the clinician observes.
    #[serde(default, alias = "O")]
    pub objective: String,
    /// Diagnosis or impression.
    #[serde(default, alias = "A")]
    pub assessment: String,
    /// Treatment plan.
    #[serde(default, alias = "P")]
    pub plan: String,
}

impl SoapNotes {
    /// Returns true if every section is blank.
    pub fn is_blank(&self) -> bool {
        [
            &self.subjective,
            &self.objective,
            &self.assessment,
            &self.plan,
        ]
        .iter()
        .all(|section| section.trim().is_empty())
    }
}

/// A clinical encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    /// Record identifier.
    pub id: String,
    /// Patient reference.
    pub patient_id: String,
    /// Physician (user) reference.
    pub physician_id: String,
    /// Encounter note.
    pub soap_notes: SoapNotes,
}

impl Record for Encounter {
    const TABLE: Table = Table::Encounters;
    const NAME: &'static str = "Encounter";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("id", &self.id)?;
        require_non_blank("patient_id", &self.patient_id)?;
        require_non_blank("physician_id", &self.physician_id)?;
        if self.soap_notes.is_blank() {
            return Err(ValidationError::missing("soap_notes"));
        }
        Ok(())
    }
}

impl Identifiable for Encounter {
    fn id(&self) -> &str {
        &self.id
    }
}
