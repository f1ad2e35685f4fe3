//! `supplychain-auth` — caller identity boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it defines the
//! opaque caller identity and how a bearer token is turned into one.

pub mod claims;
pub mod jwt;
pub mod principal;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use principal::PrincipalId;
