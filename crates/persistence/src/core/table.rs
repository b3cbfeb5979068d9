//! Named tables of the document store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named table in the document store.
///
/// The string names match the keys used in the on-disk JSON file, so a data
/// file written by an earlier deployment keeps working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// Accounts allowed to log in.
    Users,
    /// Patient demographics.
    Patients,
    /// Scheduled visits.
    Appointments,
    /// Clinical encounters with SOAP notes.
    Encounters,
    /// Medication orders.
    Prescriptions,
    /// Laboratory test orders.
    LabOrders,
    /// Laboratory test results.
    LabResults,
    /// Billing records.
    Billing,
    /// One entry per HTTP request.
    Audit,
}

impl Table {
    /// Every table, in the order they are created in a fresh data file.
    pub const ALL: [Table; 9] = [
        Table::Users,
        Table::Audit,
        Table::Patients,
        Table::Appointments,
        Table::Encounters,
        Table::Prescriptions,
        Table::LabOrders,
        Table::LabResults,
        Table::Billing,
    ];

    /// Returns the table name as stored on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Patients => "patients",
            Table::Appointments => "appointments",
            Table::Encounters => "encounters",
            Table::Prescriptions => "prescriptions",
            Table::LabOrders => "lab_orders",
            Table::LabResults => "lab_results",
            Table::Billing => "billing",
            Table::Audit => "audit",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for table in Table::ALL {
            let decoded: Table = serde_json::from_value(serde_json::json!(table.as_str())).unwrap();
            assert_eq!(decoded, table);
        }
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for table in Table::ALL {
            let encoded = serde_json::to_value(table).unwrap();
            assert_eq!(encoded, serde_json::json!(table.as_str()));
        }
    }

    #[test]
    fn test_unknown_table() {
        assert!(serde_json::from_value::<Table>(serde_json::json!("_default")).is_err());
    }
}
