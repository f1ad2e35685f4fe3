//! The registry service: authorization, mutation and audit logging.

use supplychain_auth::PrincipalId;
use supplychain_core::{Clock, ProductId, RegistryError, RegistryResult, SystemClock};

use crate::authority::Authority;
use crate::product::{LogEntry, Product};
use crate::store::{InMemoryProductStore, ProductStore};

const NOT_ALLOWED: &str = "You are not allowed to change this product's data.";

/// Single top-level service owning the manager state and the product store.
///
/// Mutations take `&mut self`, so a holder that shares the service (e.g. behind
/// an `RwLock`) gets serialized single-writer semantics for free. Each mutation
/// validates against current state, builds the new product value and commits it
/// with exactly one store write; a failure anywhere before that write leaves
/// both the authority and the store untouched.
#[derive(Debug)]
pub struct SupplyChain<S = InMemoryProductStore, C = SystemClock> {
    authority: Authority,
    store: S,
    clock: C,
}

impl SupplyChain {
    /// In-memory registry on the wall clock.
    pub fn in_memory() -> Self {
        Self::new(InMemoryProductStore::new(), SystemClock)
    }
}

impl<S, C> SupplyChain<S, C>
where
    S: ProductStore,
    C: Clock,
{
    /// Fresh service over `store`. The manager always starts unset.
    pub fn new(store: S, clock: C) -> Self {
        Self {
            authority: Authority::new(),
            store,
            clock,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Authority ────────────────────────────────────────────────────────

    /// Assign the manager position (`setOwner`).
    pub fn set_manager(&mut self, caller: PrincipalId, proposed: PrincipalId) -> RegistryResult<()> {
        self.authority.assign(caller, proposed)
    }

    pub fn get_manager(&self) -> Option<PrincipalId> {
        self.authority.manager()
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Create a product owned by the manager. Only the manager may call this.
    pub fn create_product(
        &mut self,
        caller: PrincipalId,
        name: impl Into<String>,
        status: impl Into<String>,
    ) -> RegistryResult<ProductId> {
        let manager = self.authority.require_manager()?;
        if caller != manager {
            tracing::warn!(caller = %caller, "product creation rejected: caller is not manager");
            return Err(RegistryError::unauthorized(
                "Only Manager can create a new product",
            ));
        }

        let id = ProductId::new(self.store.len()?);
        let product = Product::create(id, name.into(), caller, status.into(), self.clock.now());
        self.store.insert(product)?;

        tracing::info!(product_id = %id, owner = %caller, "product created");
        Ok(id)
    }

    /// Hand a product to `new_owner`. Only the current owner may do this; the
    /// manager has no override.
    pub fn transfer_ownership(
        &mut self,
        caller: PrincipalId,
        id: ProductId,
        new_owner: PrincipalId,
    ) -> RegistryResult<()> {
        let product = self.load(id)?;
        if !product.is_owned_by(caller) {
            tracing::warn!(product_id = %id, caller = %caller, "ownership transfer rejected");
            return Err(RegistryError::unauthorized(NOT_ALLOWED));
        }

        let next = product.with_owner(new_owner, self.clock.now());
        self.store.insert(next)?;

        tracing::info!(product_id = %id, from = %caller, to = %new_owner, "ownership transferred");
        Ok(())
    }

    /// Change a product's status. Owner or manager; requires a manager to exist.
    pub fn update_status(
        &mut self,
        caller: PrincipalId,
        id: ProductId,
        new_status: impl Into<String>,
    ) -> RegistryResult<()> {
        let product = self.load_for_admin(caller, id)?;
        let next = product.with_status(new_status.into(), self.clock.now());
        self.store.insert(next)?;

        tracing::info!(product_id = %id, caller = %caller, "product status updated");
        Ok(())
    }

    /// Change a product's name. Same contract as [`Self::update_status`].
    pub fn update_name(
        &mut self,
        caller: PrincipalId,
        id: ProductId,
        new_name: impl Into<String>,
    ) -> RegistryResult<()> {
        let product = self.load_for_admin(caller, id)?;
        let next = product.with_name(new_name.into(), self.clock.now());
        self.store.insert(next)?;

        tracing::info!(product_id = %id, caller = %caller, "product name updated");
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn get_all_products(&self) -> RegistryResult<Vec<Product>> {
        self.store.values()
    }

    pub fn get_product(&self, id: ProductId) -> RegistryResult<Product> {
        self.load(id)
    }

    pub fn get_product_logs(&self, id: ProductId) -> RegistryResult<Vec<LogEntry>> {
        Ok(self.load(id)?.logs().to_vec())
    }

    pub fn get_product_status(&self, id: ProductId) -> RegistryResult<String> {
        Ok(self.load(id)?.status().to_string())
    }

    pub fn get_product_owner(&self, id: ProductId) -> RegistryResult<PrincipalId> {
        Ok(self.load(id)?.owner())
    }

    pub fn total_products(&self) -> RegistryResult<u64> {
        self.store.len()
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn load(&self, id: ProductId) -> RegistryResult<Product> {
        self.store.get(id)?.ok_or_else(|| id.not_found())
    }

    /// Lookup, then manager existence, then owner-or-manager. Order matters:
    /// the rightful owner still gets `NoManager` when no manager is assigned.
    fn load_for_admin(&self, caller: PrincipalId, id: ProductId) -> RegistryResult<Product> {
        let product = self.load(id)?;
        let manager = self.authority.require_manager()?;
        if !product.is_owned_by(caller) && caller != manager {
            tracing::warn!(product_id = %id, caller = %caller, "product update rejected");
            return Err(RegistryError::unauthorized(NOT_ALLOWED));
        }
        Ok(product)
    }
}
