//! Registry error model.

use thiserror::Error;

/// Result type used across the registry layer.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry-level error.
///
/// The first three variants are ordinary policy outcomes: every mutating call
/// is expected to branch on them. `Storage` is reserved for failures of the
/// durable store collaborator and is never produced by the in-memory store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A manager-gated operation was attempted while no manager is assigned.
    #[error("no manager: {0}")]
    NoManager(String),

    /// The referenced product id does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller failed the operation's ownership/manager check.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The backing store failed to read or commit.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl RegistryError {
    pub fn no_manager() -> Self {
        Self::NoManager("No Manager Detected".to_string())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Stable machine-readable code, used by transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoManager(_) => "no_manager",
            Self::NotFound(_) => "not_found",
            Self::Unauthorized(_) => "unauthorized",
            Self::Storage(_) => "storage_error",
        }
    }

    /// Human-readable description of the failed precondition.
    pub fn message(&self) -> &str {
        match self {
            Self::NoManager(m) | Self::NotFound(m) | Self::Unauthorized(m) | Self::Storage(m) => m,
        }
    }
}
