//! In-memory document store.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::core::{BackendKind, DocumentStore, Query, Table};
use crate::error::StorageResult;
use crate::types::{DocId, Document};

use super::tables::TableSet;

/// Document store that keeps every table in process memory.
///
/// Used by tests and for throwaway demo runs (`EMR_DATA_FILE=:memory:`).
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<TableSet>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn insert(&self, table: Table, record: Value) -> StorageResult<DocId> {
        let doc_id = self.tables.write().insert(table, record)?;
        tracing::trace!(table = %table, doc_id, "Inserted document");
        Ok(doc_id)
    }

    async fn get(&self, table: Table, query: &Query) -> StorageResult<Option<Document>> {
        Ok(self.tables.read().get(table, query))
    }

    async fn all(&self, table: Table) -> StorageResult<Vec<Document>> {
        Ok(self.tables.read().all(table))
    }

    async fn search(&self, table: Table, query: &Query) -> StorageResult<Vec<Document>> {
        Ok(self.tables.read().search(table, query))
    }

    async fn count(&self, table: Table) -> StorageResult<usize> {
        Ok(self.tables.read().count(table))
    }
}
