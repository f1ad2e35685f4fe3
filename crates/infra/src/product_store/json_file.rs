use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use supplychain_core::{ProductId, RegistryError, RegistryResult};
use supplychain_registry::{InMemoryProductStore, Product, ProductStore};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

impl From<FileStoreError> for RegistryError {
    fn from(err: FileStoreError) -> Self {
        RegistryError::storage(err.to_string())
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    products: Vec<&'a Product>,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    products: Vec<Product>,
}

/// Product store persisted as a single JSON snapshot file.
///
/// Reads are served from memory. Every insert rewrites the snapshot through a
/// `.tmp` sibling and a rename, and only touches the in-memory map once that
/// rename succeeded, so a failed write leaves both file and map as they were.
#[derive(Debug)]
pub struct JsonFileProductStore {
    path: PathBuf,
    inner: InMemoryProductStore,
}

impl JsonFileProductStore {
    /// Open the snapshot at `path`, or start empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FileStoreError> {
        let path = path.into();

        let products = match std::fs::read(&path) {
            Ok(bytes) => Self::decode(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(FileStoreError::Io { path, source }),
        };

        tracing::info!(path = %path.display(), products = products.len(), "product snapshot opened");
        Ok(Self {
            path,
            inner: InMemoryProductStore::from_map(products),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(bytes: &[u8]) -> Result<BTreeMap<ProductId, Product>, FileStoreError> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(FileStoreError::Corrupt(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }

        let mut products = BTreeMap::new();
        for product in snapshot.products {
            if product.logs().is_empty() {
                return Err(FileStoreError::Corrupt(format!(
                    "product #{} has an empty log",
                    product.id()
                )));
            }
            if products.insert(product.id(), product).is_some() {
                return Err(FileStoreError::Corrupt("duplicate product id".to_string()));
            }
        }

        // Ids are assigned from the size of the map, so they must be 0..n.
        for (expected, id) in products.keys().enumerate() {
            if id.get() != expected as u64 {
                return Err(FileStoreError::Corrupt(format!(
                    "product ids are not contiguous (expected #{expected}, found #{id})"
                )));
            }
        }

        Ok(products)
    }

    fn write_with(&self, product: &Product) -> Result<(), FileStoreError> {
        let current = self.inner.as_map();
        let mut products: Vec<&Product> = current
            .values()
            .map(|p| if p.id() == product.id() { product } else { p })
            .collect();
        if !current.contains_key(&product.id()) {
            products.push(product);
        }

        let bytes = serde_json::to_vec_pretty(&SnapshotRef {
            version: SNAPSHOT_VERSION,
            products,
        })?;
        self.atomic_write(&bytes)
    }

    fn atomic_write(&self, data: &[u8]) -> Result<(), FileStoreError> {
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, data).map_err(|source| FileStoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| FileStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

impl ProductStore for JsonFileProductStore {
    fn get(&self, id: ProductId) -> RegistryResult<Option<Product>> {
        self.inner.get(id)
    }

    fn insert(&mut self, product: Product) -> RegistryResult<()> {
        if let Err(e) = self.write_with(&product) {
            tracing::error!(path = %self.path.display(), product_id = %product.id(), error = %e, "snapshot write failed");
            return Err(e.into());
        }
        self.inner.insert(product)
    }

    fn values(&self) -> RegistryResult<Vec<Product>> {
        self.inner.values()
    }

    fn len(&self) -> RegistryResult<u64> {
        self.inner.len()
    }
}
