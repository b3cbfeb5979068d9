//! Test infrastructure for the REST API.

pub mod harness;

pub use harness::*;
