//! Product store: keyed persistence for product records

use crate::core::product::Product;
use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Trait for product store implementations.
///
/// Every call is independently atomic at single-record granularity; the
/// contract offers no transaction spanning multiple calls. Callers that
/// read, modify and write back a record get no protection against
/// interleaved writers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Get a product by id, if present
    async fn get(&self, id: &str) -> Result<Option<Product>>;

    /// Insert or replace a product record wholesale
    async fn put(&self, product: Product) -> Result<Product>;

    /// Delete a product by id, returning whether a record was removed
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Check whether a product with the given id exists
    async fn exists(&self, id: &str) -> Result<bool>;

    /// Materialize every product, in no particular order
    async fn scan_all(&self) -> Result<Vec<Product>>;
}

/// In-memory implementation of the product store.
///
/// Backed by a concurrent map, so each operation is atomic per record
/// without any store-wide lock.
pub struct InMemoryProductStore {
    records: DashMap<String, Product>,
}

impl InMemoryProductStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, product: Product) -> Result<Product> {
        self.records.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.records.remove(id).is_some())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.records.contains_key(id))
    }

    async fn scan_all(&self) -> Result<Vec<Product>> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
