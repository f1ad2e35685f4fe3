//! Product registry (manager-gated, owner-held, audited).
//!
//! This crate contains the authorization and state-transition rules for
//! products, implemented as deterministic logic over a pluggable
//! [`ProductStore`] and [`supplychain_core::Clock`] (no IO, no HTTP).

pub mod authority;
pub mod product;
pub mod registry;
pub mod store;

pub use authority::Authority;
pub use product::{LogEntry, Product};
pub use registry::SupplyChain;
pub use store::{InMemoryProductStore, ProductStore};
