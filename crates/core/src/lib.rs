//! `supplychain-core` — registry foundation building blocks.
//!
//! This crate contains **pure** primitives shared by the registry, its stores
//! and its transport (no infrastructure concerns).

pub mod clock;
pub mod error;
pub mod id;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{RegistryError, RegistryResult};
pub use id::ProductId;
