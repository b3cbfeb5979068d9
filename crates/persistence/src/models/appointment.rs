//! Scheduled visits.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Identifiable, Record, require_non_blank};
use crate::core::Table;
use crate::error::ValidationError;

/// An appointment between a patient and a physician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Record identifier.
    pub id: String,
    /// Patient reference.
    pub patient_id: String,
    /// Physician (user) reference.
    pub physician_id: String,
    /// Calendar date, stored as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Local start time as `HH:MM`.
    pub time: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    /// Returns the parsed start time.
    pub fn start_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, "%H:%M").ok()
    }
}

impl Record for Appointment {
    const TABLE: Table = Table::Appointments;
    const NAME: &'static str = "Appointment";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("id", &self.id)?;
        require_non_blank("patient_id", &self.patient_id)?;
        require_non_blank("physician_id", &self.physician_id)?;
        if self.start_time().is_none() {
            return Err(ValidationError::invalid("time", "expected HH:MM"));
        }
        Ok(())
    }
}

impl Identifiable for Appointment {
    fn id(&self) -> &str {
        &self.id
    }
}
