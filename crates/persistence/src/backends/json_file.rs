//! Single-file JSON document store.
//!
//! The file holds every table in the TinyDB layout, pretty-printed with a
//! four-space indent:
//!
//! ```json
//! {
//!     "patients": {
//!         "1": { "id": "p1", "first_name": "John", ... }
//!     },
//!     "audit": { ... }
//! }
//! ```
//!
//! The whole file is loaded at open time and rewritten after every insert.
//! Rewrites go to a temporary file in the same directory which is then renamed
//! over the data file, so a crash mid-write leaves the previous contents.

use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::core::{BackendKind, DocumentStore, Query, Table};
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{DocId, Document};

use super::tables::TableSet;

const BACKEND_NAME: &str = "json-file";

/// Document store persisted to one JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    tables: RwLock<TableSet>,
}

impl Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl JsonFileStore {
    /// Opens the data file at `path`, creating it (and its parent directory)
    /// if it does not exist.
    ///
    /// # Errors
    ///
    /// * `BackendError::Io` - If the file or directory cannot be read or created
    /// * `BackendError::CorruptDataFile` - If the file is not a JSON table map
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }

        let tables = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
            if raw.trim().is_empty() {
                TableSet::with_known_tables()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    StorageError::Backend(BackendError::CorruptDataFile {
                        backend_name: BACKEND_NAME.to_string(),
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })
                })?
            }
        } else {
            let tables = TableSet::with_known_tables();
            write_atomically(&path, &tables)?;
            tables
        };

        tracing::info!(path = %path.display(), "Opened JSON document store");

        Ok(Self {
            path,
            tables: RwLock::new(tables),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::JsonFile
    }

    async fn insert(&self, table: Table, record: Value) -> StorageResult<DocId> {
        // The write lock is held across the file write so the file always
        // reflects a prefix of the insert order.
        let mut tables = self.tables.write();
        let doc_id = tables.insert(table, record)?;

        if let Err(e) = write_atomically(&self.path, &tables) {
            tables.remove(table, doc_id);
            return Err(e);
        }

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

fn write_atomically(path: &Path, tables: &TableSet) -> StorageResult<()> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    tables.serialize(&mut serializer).map_err(|e| {
        StorageError::Backend(BackendError::Internal {
            backend_name: BACKEND_NAME.to_string(),
            message: format!("failed to encode tables: {}", e),
        })
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|source| io_error(dir, source))?;
    file.write_all(&buffer)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|source| io_error(path, source))?;
    file.persist(path)
        .map_err(|e| io_error(path, e.error))?;

    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Backend(BackendError::Io {
        backend_name: BACKEND_NAME.to_string(),
        path: path.display().to_string(),
        source,
    })
}
