//! In-memory table map shared by every backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{Query, Table};
use crate::error::ValidationError;
use crate::types::{DocId, Document};

/// Every table of a database, keyed by table name and then by `doc_id`.
///
/// Serializes to the TinyDB file layout:
/// `{"patients": {"1": {...}, "2": {...}}, ...}`. Tables this crate does not
/// know about (TinyDB's `_default`, for example) are preserved untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct TableSet {
    tables: BTreeMap<String, BTreeMap<DocId, Value>>,
}

impl TableSet {
    /// Creates a table set with every known table present and empty.
    pub(crate) fn with_known_tables() -> Self {
        let mut set = Self::default();
        for table in Table::ALL {
            set.tables.entry(table.as_str().to_string()).or_default();
        }
        set
    }

    /// Appends `record` to `table`, returning the assigned id.
    pub(crate) fn insert(&mut self, table: Table, record: Value) -> Result<DocId, ValidationError> {
        if !record.is_object() {
            return Err(ValidationError::NotAnObject { table });
        }

        let rows = self.tables.entry(table.as_str().to_string()).or_default();
        let doc_id = rows.keys().next_back().map_or(1, |last| last + 1);
        rows.insert(doc_id, record);
        Ok(doc_id)
    }

    /// Removes a document. Only used to undo an insert that failed to persist.
    pub(crate) fn remove(&mut self, table: Table, doc_id: DocId) {
        if let Some(rows) = self.tables.get_mut(table.as_str()) {
            rows.remove(&doc_id);
        }
    }

    pub(crate) fn get(&self, table: Table, query: &Query) -> Option<Document> {
        self.rows(table)?
            .iter()
            .find(|(_, content)| query.matches(content))
            .map(|(doc_id, content)| Document::new(*doc_id, content.clone()))
    }

    pub(crate) fn all(&self, table: Table) -> Vec<Document> {
        self.search(table, &Query::any())
    }

    pub(crate) fn search(&self, table: Table, query: &Query) -> Vec<Document> {
        self.rows(table)
            .map(|rows| {
                rows.iter()
                    .filter(|(_, content)| query.matches(content))
                    .map(|(doc_id, content)| Document::new(*doc_id, content.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, table: Table) -> usize {
        self.rows(table).map_or(0, BTreeMap::len)
    }

    fn rows(&self, table: Table) -> Option<&BTreeMap<DocId, Value>> {
        self.tables.get(table.as_str())
    }
}
