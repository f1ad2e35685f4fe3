//! Registry wiring shared by all handlers.

use std::sync::RwLock;

use anyhow::Context;

use supplychain_core::{RegistryError, RegistryResult, SystemClock};
use supplychain_infra::JsonFileProductStore;
use supplychain_registry::{InMemoryProductStore, ProductStore, SupplyChain};

use crate::config::ApiConfig;

pub type DynProductStore = Box<dyn ProductStore>;
pub type Registry = SupplyChain<DynProductStore, SystemClock>;

/// The single registry instance behind a reader/writer lock.
///
/// Mutations hold the write lock for the whole read-validate-commit step, so
/// they are serialized and readers never see a half-applied change.
pub struct AppServices {
    registry: RwLock<Registry>,
}

impl AppServices {
    pub fn new(store: DynProductStore) -> Self {
        Self {
            registry: RwLock::new(SupplyChain::new(store, SystemClock)),
        }
    }

    pub fn read<T>(&self, f: impl FnOnce(&Registry) -> RegistryResult<T>) -> RegistryResult<T> {
        let guard = self
            .registry
            .read()
            .map_err(|_| RegistryError::storage("registry lock poisoned"))?;
        f(&guard)
    }

    pub fn write<T>(&self, f: impl FnOnce(&mut Registry) -> RegistryResult<T>) -> RegistryResult<T> {
        let mut guard = self
            .registry
            .write()
            .map_err(|_| RegistryError::storage("registry lock poisoned"))?;
        f(&mut guard)
    }
}

pub fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let store: DynProductStore = match &config.data_file {
        Some(path) => {
            let store = JsonFileProductStore::open(path)
                .with_context(|| format!("failed to open product snapshot at {}", path.display()))?;
            Box::new(store)
        }
        None => {
            tracing::info!("SUPPLYCHAIN_DATA_FILE not set; products are kept in memory only");
            Box::new(InMemoryProductStore::new())
        }
    };

    Ok(AppServices::new(store))
}
