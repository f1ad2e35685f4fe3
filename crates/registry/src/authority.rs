//! Manager assignment.

use supplychain_auth::PrincipalId;
use supplychain_core::{RegistryError, RegistryResult};

/// Holds the optional identity of the current manager.
///
/// Starts empty. The first assignment is accepted from anyone; after that only
/// the sitting manager may hand the position over.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Authority {
    manager: Option<PrincipalId>,
}

impl Authority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manager(&self) -> Option<PrincipalId> {
        self.manager
    }

    pub fn is_manager(&self, who: PrincipalId) -> bool {
        self.manager == Some(who)
    }

    /// Return the manager, or `NoManager` if none is assigned.
    pub fn require_manager(&self) -> RegistryResult<PrincipalId> {
        self.manager.ok_or_else(RegistryError::no_manager)
    }

    /// Either leaves the state untouched (on error) or overwrites it with `proposed`.
    pub fn assign(&mut self, caller: PrincipalId, proposed: PrincipalId) -> RegistryResult<()> {
        match self.manager {
            None => {
                tracing::info!(manager = %proposed, "no manager set; accepting first assignment");
            }
            Some(current) if current == caller => {
                tracing::info!(from = %current, to = %proposed, "manager reassigned");
            }
            Some(_) => {
                tracing::warn!(caller = %caller, "manager reassignment rejected");
                return Err(RegistryError::unauthorized(
                    "Only Current Manager can change the Manager Position.",
                ));
            }
        }
        self.manager = Some(proposed);
        Ok(())
    }
}
