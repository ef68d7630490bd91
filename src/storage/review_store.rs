//! Review store: keyed persistence plus a lookup by owning product

use crate::core::review::Review;
use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Trait for review store implementations.
///
/// Same single-record atomicity contract as the product store. The store
/// never enforces that `product_id` references an existing product.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Get a review by id, if present
    async fn get(&self, id: &str) -> Result<Option<Review>>;

    /// Insert or replace a review record wholesale
    async fn put(&self, review: Review) -> Result<Review>;

    /// Delete a review by id, returning whether a record was removed
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Check whether a review with the given id exists
    async fn exists(&self, id: &str) -> Result<bool>;

    /// All reviews owned by the given product, in no particular order
    async fn find_by_owner(&self, product_id: &str) -> Result<Vec<Review>>;
}

/// In-memory implementation of the review store.
///
/// The owner lookup is a full scan; there is no secondary index.
pub struct InMemoryReviewStore {
    records: DashMap<String, Review>,
}

impl InMemoryReviewStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl Default for InMemoryReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn get(&self, id: &str) -> Result<Option<Review>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, review: Review) -> Result<Review> {
        self.records.insert(review.id.clone(), review.clone());
        Ok(review)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.records.remove(id).is_some())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.records.contains_key(id))
    }

    async fn find_by_owner(&self, product_id: &str) -> Result<Vec<Review>> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.value().product_id == product_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}
