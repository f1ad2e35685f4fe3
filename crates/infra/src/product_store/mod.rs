//! Durable `ProductStore` implementations.
//!
//! The registry only depends on the `ProductStore` contract; this module
//! provides backends that survive a process restart.

pub mod json_file;

pub use json_file::{FileStoreError, JsonFileProductStore};
