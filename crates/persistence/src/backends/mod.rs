//! Document store backend implementations.
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | [`MemoryStore`](memory::MemoryStore) | always | Process-local tables, for tests and throwaway runs |
//! | [`JsonFileStore`](json_file::JsonFileStore) | `json-file` | TinyDB-compatible single JSON file |
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "json-file")]
//! use easy_emr_persistence::backends::json_file::JsonFileStore;
//!
//! # #[cfg(feature = "json-file")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::open("./data/db.json")?;
//! # Ok(())
//! # }
//! ```

pub mod memory;
mod tables;

#[cfg(feature = "json-file")]
pub mod json_file;
