//! Test fixtures for persistence layer testing.
//!
//! Builders for typed records with sensible defaults, so each test only
//! spells out the fields it cares about.

#![allow(dead_code)]

use chrono::NaiveDate;

use easy_emr_persistence::models::{
    Appointment, AuditLogEntry, BillingRecord, Encounter, LabOrder, LabOrderStatus, LabResult,
    Patient, Prescription, Role, SoapNotes, User,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// The reference patient used across scenarios.
pub fn john_doe() -> Patient {
    Patient {
        id: "p1".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        dob: date(1990, 1, 1),
        gender: "male".to_string(),
        insurance: None,
    }
}

pub fn patient(id: &str, first_name: &str, last_name: &str) -> Patient {
    Patient {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        ..john_doe()
    }
}

pub fn user(username: &str, role: Role) -> User {
    User {
        id: format!("user-{username}"),
        username: username.to_string(),
        password_hash: Some("$2b$04$not-a-real-hash".to_string()),
        role,
        display_name: None,
    }
}

pub fn appointment(id: &str, patient_id: &str) -> Appointment {
    Appointment {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        physician_id: "doc1".to_string(),
        date: date(2024, 3, 15),
        time: "09:30".to_string(),
        notes: None,
    }
}

pub fn encounter(id: &str, patient_id: &str) -> Encounter {
    Encounter {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        physician_id: "doc1".to_string(),
        soap_notes: SoapNotes {
            subjective: "headache".to_string(),
            objective: "BP 120/80".to_string(),
            assessment: "tension headache".to_string(),
            plan: "rest".to_string(),
        },
    }
}

pub fn prescription(id: &str, patient_id: &str) -> Prescription {
    Prescription {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        physician_id: "doc1".to_string(),
        medication: "ibuprofen".to_string(),
        dosage: "200mg".to_string(),
        frequency: "twice daily".to_string(),
    }
}

pub fn lab_order(id: &str, patient_id: &str) -> LabOrder {
    LabOrder {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        test_name: "CBC".to_string(),
        status: LabOrderStatus::Pending,
    }
}

pub fn lab_result(id: &str, order_id: &str) -> LabResult {
    LabResult {
        id: id.to_string(),
        order_id: order_id.to_string(),
        result: "normal".to_string(),
        file_path: None,
    }
}

pub fn billing(id: &str, patient_id: &str) -> BillingRecord {
    BillingRecord {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        encounter_id: "e1".to_string(),
        amount: 125.5,
        paid: false,
    }
}

pub fn audit(path: &str, method: &str, status_code: u16) -> AuditLogEntry {
    AuditLogEntry {
        path: path.to_string(),
        method: method.to_string(),
        status_code,
        duration: 0.005,
    }
}
