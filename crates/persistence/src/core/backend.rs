//! Backend identification.

use std::fmt;

/// Identifies the type of document store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Process-local tables, lost on exit.
    Memory,
    /// Tables persisted to a single JSON file in the TinyDB layout.
    JsonFile,
    /// Custom or unknown backend.
    Custom(&'static str),
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::JsonFile => write!(f, "json-file"),
            BackendKind::Custom(name) => write!(f, "{}", name),
        }
    }
}
