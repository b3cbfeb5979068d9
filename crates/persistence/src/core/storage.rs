//! Core document storage trait.
//!
//! This module defines the [`DocumentStore`] trait, the contract every backend
//! provides to the CRUD layer: append a JSON object to a named table, fetch
//! the first document matching a [`Query`], or list a whole table.

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{BackendKind, Query, Table};
use crate::error::StorageResult;
use crate::types::{DocId, Document};

/// Storage trait for schemaless JSON documents grouped into named tables.
///
/// Documents are identified inside their table by a [`DocId`] that the store
/// assigns on insert. Ids increase monotonically per table, so ordering by
/// `doc_id` is ordering by insertion.
///
/// There are no update or delete operations: the audit table relies on
/// records being append-only, and no other table needs mutation.
///
/// # Concurrency
///
/// Implementations must be safe to share across tasks. No isolation is
/// promised between a `get` and a later `insert`; two concurrent inserts of
/// the same logical id both succeed.
///
/// # Example
///
/// ```ignore
/// use easy_emr_persistence::core::{DocumentStore, Query, Table};
/// use serde_json::json;
///
/// async fn example<S: DocumentStore>(store: &S) -> StorageResult<()> {
///     let doc_id = store
///         .insert(Table::Patients, json!({"id": "p1", "first_name": "John"}))
///         .await?;
///
///     let found = store.get(Table::Patients, &Query::field("id").eq("p1")).await?;
///     assert_eq!(found.unwrap().doc_id(), doc_id);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Returns the kind of this backend.
    fn backend_kind(&self) -> BackendKind;

    /// Appends a record to `table` and returns its assigned id.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation(NotAnObject)` - If `record` is not a JSON object
    /// * `StorageError::Backend` - If the record could not be persisted
    async fn insert(&self, table: Table, record: Value) -> StorageResult<DocId>;

    /// Returns the first document (lowest `doc_id`) in `table` matching `query`.
    async fn get(&self, table: Table, query: &Query) -> StorageResult<Option<Document>>;

    /// Returns every document in `table`, ordered by `doc_id`.
    async fn all(&self, table: Table) -> StorageResult<Vec<Document>>;

    /// Returns every document in `table` matching `query`, ordered by `doc_id`.
    async fn search(&self, table: Table, query: &Query) -> StorageResult<Vec<Document>> {
        let documents = self.all(table).await?;
        Ok(documents
            .into_iter()
            .filter(|document| query.matches(document.content()))
            .collect())
    }

    /// Returns the number of documents in `table`.
    async fn count(&self, table: Table) -> StorageResult<usize> {
        Ok(self.all(table).await?.len())
    }
}
