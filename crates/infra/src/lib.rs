//! Infrastructure layer: durable storage adapters for the registry.

pub mod product_store;

pub use product_store::{FileStoreError, JsonFileProductStore};
