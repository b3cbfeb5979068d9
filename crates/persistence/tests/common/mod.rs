//! Shared fixtures for persistence integration tests.

pub mod fixtures;

pub use fixtures::*;
