//! Stored document type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-table insertion sequence number assigned by the store.
pub type DocId = u64;

/// A JSON object as held by the document store, with its assigned id.
///
/// The `doc_id` is store metadata: it is not part of `content` and is never
/// written inside the record itself.
///
/// # Examples
///
/// ```
/// use easy_emr_persistence::types::Document;
/// use serde_json::json;
///
/// let document = Document::new(3, json!({"id": "p1"}));
/// assert_eq!(document.doc_id(), 3);
/// assert_eq!(document.content()["id"], "p1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    doc_id: DocId,
    content: Value,
}

impl Document {
    /// Creates a document with the given id and content.
    pub fn new(doc_id: DocId, content: Value) -> Self {
        Self { doc_id, content }
    }

    /// Returns the store-assigned id.
    pub fn doc_id(&self) -> DocId {
        self.doc_id
    }

    /// Returns the record content.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Consumes the document and returns the record content.
    pub fn into_content(self) -> Value {
        self.content
    }
}
