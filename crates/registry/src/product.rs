use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supplychain_auth::PrincipalId;
use supplychain_core::ProductId;

/// One recorded event in a product's history. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub time: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            time,
        }
    }
}

/// A tracked product with its append-only audit log.
///
/// Every change goes through a method that returns a *new* value with one log
/// entry appended; the registry commits that value in a single store write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    owner: PrincipalId,
    status: String,
    logs: Vec<LogEntry>,
}

impl Product {
    /// Build a freshly created product. The caller becomes its owner.
    pub fn create(
        id: ProductId,
        name: String,
        owner: PrincipalId,
        status: String,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            owner,
            status,
            logs: vec![LogEntry::new(format!("Product with ID #{id} was created"), at)],
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> PrincipalId {
        self.owner
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn is_owned_by(&self, who: PrincipalId) -> bool {
        self.owner == who
    }

    pub fn with_owner(&self, new_owner: PrincipalId, at: DateTime<Utc>) -> Self {
        let mut next = self.appended(format!("Ownership Transferred to {new_owner}"), at);
        next.owner = new_owner;
        next
    }

    pub fn with_status(&self, new_status: String, at: DateTime<Utc>) -> Self {
        let mut next = self.appended(format!("Product Status Changed To: {new_status}"), at);
        next.status = new_status;
        next
    }

    pub fn with_name(&self, new_name: String, at: DateTime<Utc>) -> Self {
        let mut next = self.appended(format!("Product Name Changed To: {new_name}"), at);
        next.name = new_name;
        next
    }

    fn appended(&self, message: String, at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.logs.push(LogEntry::new(message, at));
        next
    }
}
