//! Core types shared by the store and the CRUD layer.

mod document;
mod pagination;

pub use document::{DocId, Document};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, Page, Paginated};
