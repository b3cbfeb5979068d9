//! Patient demographics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Identifiable, Record, require_non_blank};
use crate::core::Table;
use crate::error::ValidationError;

/// A patient.
///
/// ```
/// use easy_emr_persistence::models::Patient;
/// use serde_json::json;
///
/// let patient: Patient = serde_json::from_value(json!({
///     "id": "p1",
///     "first_name": "John",
///     "last_name": "Doe",
///     "dob": "1990-01-01",
///     "gender": "M"
/// }))
/// .unwrap();
///
/// assert_eq!(patient.dob.to_string(), "1990-01-01");
/// assert!(patient.insurance.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Record identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth, stored as `YYYY-MM-DD`.
    pub dob: NaiveDate,
    /// Administrative gender as entered.
    pub gender: String,
    /// Insurance identifier.
    #[serde(default)]
    pub insurance: Option<String>,
}

impl Record for Patient {
    const TABLE: Table = Table::Patients;
    const NAME: &'static str = "Patient";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("id", &self.id)?;
        require_non_blank("first_name", &self.first_name)?;
        require_non_blank("last_name", &self.last_name)?;
        require_non_blank("gender", &self.gender)?;
        Ok(())
    }
}

impl Identifiable for Patient {
    fn id(&self) -> &str {
        &self.id
    }
}
