//! Process configuration, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `SUPPLYCHAIN_BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `SUPPLYCHAIN_DATA_FILE`; products are kept in memory only when unset.
    pub data_file: Option<PathBuf>,
    /// `JWT_SECRET`
    pub jwt_secret: String,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_raw = lookup("SUPPLYCHAIN_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .with_context(|| format!("invalid SUPPLYCHAIN_BIND_ADDR '{bind_raw}'"))?;

        let data_file = lookup("SUPPLYCHAIN_DATA_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        Ok(Self {
            bind_addr,
            data_file,
            jwt_secret,
        })
    }

    /// In-memory config on an ephemeral loopback port (tests, local runs).
    pub fn ephemeral(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            data_file: None,
            jwt_secret: jwt_secret.into(),
        }
    }
}
