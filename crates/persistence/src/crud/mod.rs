//! Typed CRUD operations over a [`DocumentStore`].
//!
//! The [`Repository`] is the only code that knows which table a record lives
//! in and how records are looked up. Handlers call it with typed models and
//! get typed models back; the document layout never leaks upward.

mod audit;

pub use audit::AuditFilter;

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::core::{DocumentStore, Query, Table};
use crate::error::StorageResult;
use crate::models::{
    Appointment, AuditLogEntry, BillingRecord, Encounter, Identifiable, LabOrder, LabResult,
    Patient, Prescription, Record, User,
};
use crate::types::{DocId, Page, Paginated};

/// Typed access to every EMR table.
///
/// Cloning a repository is cheap; all clones share the same store.
pub struct Repository<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> Clone for Repository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> Repository<S> {
    /// Creates a repository over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validates `record` and appends it to its table.
    ///
    /// Records are stored exactly as given. Nothing checks that the `id` is
    /// unique, so a second record with the same id is stored too and is
    /// shadowed by the first on lookup.
    #[instrument(skip_all, fields(table = %R::TABLE))]
    pub async fn add<R: Record>(&self, record: &R) -> StorageResult<DocId> {
        record.validate()?;
        let document = record.to_document()?;
        let doc_id = self.store.insert(R::TABLE, document).await?;
        debug!(doc_id, "Stored {}", R::NAME);
        Ok(doc_id)
    }

    /// Returns the first record of type `R` whose `id` equals `id`.
    pub async fn get_by_id<R: Identifiable>(&self, id: &str) -> StorageResult<Option<R>> {
        self.find_one(&Query::field("id").eq(id)).await
    }

    /// Returns every record of type `R` in insertion order.
    pub async fn list<R: Record>(&self) -> StorageResult<Vec<R>> {
        self.store
            .all(R::TABLE)
            .await?
            .into_iter()
            .map(R::from_document)
            .collect()
    }

    async fn find_one<R: Record>(&self, query: &Query) -> StorageResult<Option<R>> {
        self.store
            .get(R::TABLE, query)
            .await?
            .map(R::from_document)
            .transpose()
    }

    // Users

    /// Stores a user account.
    pub async fn add_user(&self, user: &User) -> StorageResult<DocId> {
        self.add(user).await
    }

    /// Looks a user up by id.
    pub async fn get_user_by_id(&self, id: &str) -> StorageResult<Option<User>> {
        self.get_by_id(id).await
    }

    /// Looks a user up by login name.
    pub async fn find_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        self.find_one(&Query::field("username").eq(username)).await
    }

    /// Lists every user account.
    pub async fn list_users(&self) -> StorageResult<Vec<User>> {
        self.list().await
    }

    // Patients

    /// Stores a patient.
    pub async fn add_patient(&self, patient: &Patient) -> StorageResult<DocId> {
        self.add(patient).await
    }

    /// Looks a patient up by id.
    pub async fn get_patient_by_id(&self, id: &str) -> StorageResult<Option<Patient>> {
        self.get_by_id(id).await
    }

    /// Lists every patient.
    pub async fn list_patients(&self) -> StorageResult<Vec<Patient>> {
        self.list().await
    }

    // Clinical and financial records

    /// Stores an appointment.
    pub async fn add_appointment(&self, appointment: &Appointment) -> StorageResult<DocId> {
        self.add(appointment).await
    }

    /// Looks an appointment up by id.
    pub async fn get_appointment_by_id(&self, id: &str) -> StorageResult<Option<Appointment>> {
        self.get_by_id(id).await
    }

    /// Stores an encounter.
    pub async fn add_encounter(&self, encounter: &Encounter) -> StorageResult<DocId> {
        self.add(encounter).await
    }

    /// Looks an encounter up by id.
    pub async fn get_encounter_by_id(&self, id: &str) -> StorageResult<Option<Encounter>> {
        self.get_by_id(id).await
    }

    /// Stores a prescription.
    pub async fn add_prescription(&self, prescription: &Prescription) -> StorageResult<DocId> {
        self.add(prescription).await
    }

    /// Looks a prescription up by id.
    pub async fn get_prescription_by_id(&self, id: &str) -> StorageResult<Option<Prescription>> {
        self.get_by_id(id).await
    }

    /// Stores a lab order.
    pub async fn add_lab_order(&self, order: &LabOrder) -> StorageResult<DocId> {
        self.add(order).await
    }

    /// Looks a lab order up by id.
    pub async fn get_lab_order_by_id(&self, id: &str) -> StorageResult<Option<LabOrder>> {
        self.get_by_id(id).await
    }

    /// Stores a lab result.
    pub async fn add_lab_result(&self, result: &LabResult) -> StorageResult<DocId> {
        self.add(result).await
    }

    /// Looks a lab result up by id.
    pub async fn get_lab_result_by_id(&self, id: &str) -> StorageResult<Option<LabResult>> {
        self.get_by_id(id).await
    }

    /// Stores a billing record.
    pub async fn add_billing_record(&self, record: &BillingRecord) -> StorageResult<DocId> {
        self.add(record).await
    }

    /// Looks a billing record up by id.
    pub async fn get_billing_record_by_id(
        &self,
        id: &str,
    ) -> StorageResult<Option<BillingRecord>> {
        self.get_by_id(id).await
    }

    // Audit

    /// Appends one audit entry.
    pub async fn add_audit_log(&self, entry: &AuditLogEntry) -> StorageResult<DocId> {
        self.add(entry).await
    }

    /// Returns the audit entries matching `filter`, newest first, cut to `page`.
    ///
    /// `total` counts every matching entry, not just the returned slice.
    pub async fn list_audit_logs(
        &self,
        filter: &AuditFilter,
        page: Page,
    ) -> StorageResult<Paginated<AuditLogEntry>> {
        let mut matching = Vec::new();
        for document in self.store.all(Table::Audit).await? {
            let doc_id = document.doc_id();
            let entry = AuditLogEntry::from_document(document)?;
            if filter.matches(&entry) {
                matching.push((doc_id, entry));
            }
        }
        matching.sort_by(|(a, _), (b, _)| b.cmp(a));

        let paginated = page.apply(matching);
        Ok(Paginated {
            total: paginated.total,
            items: paginated.items.into_iter().map(|(_, entry)| entry).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::MemoryStore;
    use crate::error::{StorageError, ValidationError};
    use crate::models::Role;
    use chrono::NaiveDate;
    use serde_json::json;

    fn repository() -> Repository<MemoryStore> {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    fn patient(id: &str, first_name: &str) -> Patient {
        Patient {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            gender: "male".to_string(),
            insurance: None,
        }
    }

    #[tokio::test]
    async fn test_get_returns_first_of_duplicate_ids() {
        let repo = repository();
        repo.add_patient(&patient("p1", "John")).await.unwrap();
        repo.add_patient(&patient("p1", "Jack")).await.unwrap();

        let found = repo.get_patient_by_id("p1").await.unwrap().unwrap();
        assert_eq!(found.first_name, "John");
        assert_eq!(repo.list_patients().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_record_is_not_stored() {
        let repo = repository();
        let err = repo.add_patient(&patient("", "John")).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Validation(ValidationError::MissingRequiredField { .. })
        ));
        assert_eq!(repo.store().count(Table::Patients).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_user_by_username() {
        let repo = repository();
        let user = User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            password_hash: Some("hash".to_string()),
            role: Role::Physician,
            display_name: None,
        };
        repo.add_user(&user).await.unwrap();

        assert_eq!(
            repo.find_user_by_username("alice").await.unwrap(),
            Some(user)
        );
        assert_eq!(repo.find_user_by_username("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_stored_document_is_decode_error() {
        let repo = repository();
        repo.store()
            .insert(Table::Patients, json!({"id": "p9", "dob": "not a date"}))
            .await
            .unwrap();

        let err = repo.get_patient_by_id("p9").await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_audit_logs_newest_first() {
        let repo = repository();
        for (i, path) in ["/a", "/b", "/c"].into_iter().enumerate() {
            repo.add_audit_log(&AuditLogEntry {
                path: path.to_string(),
                method: "GET".to_string(),
                status_code: 200,
                duration: i as f64,
            })
            .await
            .unwrap();
        }

        let page = repo
            .list_audit_logs(&AuditFilter::default(), Page::new(1, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        let paths: Vec<_> = page.items.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["/c", "/b"]);
    }
}
