//! Product storage contract.

use std::collections::BTreeMap;

use supplychain_core::{ProductId, RegistryResult};

use crate::product::Product;

/// Durable ordered mapping from product id to product.
///
/// Insertion is the only write primitive; there is no delete. Implementations
/// must make `insert` all-or-nothing: on error the mapping is unchanged.
pub trait ProductStore: Send + Sync {
    fn get(&self, id: ProductId) -> RegistryResult<Option<Product>>;

    /// Insert or overwrite the product stored under `product.id()`.
    fn insert(&mut self, product: Product) -> RegistryResult<()>;

    /// All products in ascending id order.
    fn values(&self) -> RegistryResult<Vec<Product>>;

    fn len(&self) -> RegistryResult<u64>;
}

impl<S> ProductStore for Box<S>
where
    S: ProductStore + ?Sized,
{
    fn get(&self, id: ProductId) -> RegistryResult<Option<Product>> {
        (**self).get(id)
    }

    fn insert(&mut self, product: Product) -> RegistryResult<()> {
        (**self).insert(product)
    }

    fn values(&self) -> RegistryResult<Vec<Product>> {
        (**self).values()
    }

    fn len(&self) -> RegistryResult<u64> {
        (**self).len()
    }
}

/// In-memory store. Intended for tests/dev; lost on restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    products: BTreeMap<ProductId, Product>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an existing mapping (e.g. a loaded snapshot).
    pub fn from_map(products: BTreeMap<ProductId, Product>) -> Self {
        Self { products }
    }

    pub fn as_map(&self) -> &BTreeMap<ProductId, Product> {
        &self.products
    }
}

impl ProductStore for InMemoryProductStore {
    fn get(&self, id: ProductId) -> RegistryResult<Option<Product>> {
        Ok(self.products.get(&id).cloned())
    }

    fn insert(&mut self, product: Product) -> RegistryResult<()> {
        self.products.insert(product.id(), product);
        Ok(())
    }

    fn values(&self) -> RegistryResult<Vec<Product>> {
        Ok(self.products.values().cloned().collect())
    }

    fn len(&self) -> RegistryResult<u64> {
        Ok(self.products.len() as u64)
    }
}
