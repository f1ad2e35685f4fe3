//! HTTP API: server, routing, and request/response mapping for the registry.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
