//! Embedded review copy maintenance.
//!
//! The coordinator is the sole writer of the denormalized product/review
//! relationship: it appends a newly created review into the owning
//! product's embedded sequence and re-saves the product wholesale.
//!
//! The read-modify-write is unsynchronized. If two attaches for the same
//! product interleave, both read the same base record, append
//! independently, and the later write wins, silently dropping the earlier
//! embedded entry. The standalone review records are unaffected by the
//! race. There is also no compensation: when a caller has already
//! persisted the standalone review and this call fails, the two views
//! diverge and the failure is surfaced to the caller.

use crate::core::product::Product;
use crate::core::review::Review;
use crate::error::{Error, Result};
use crate::storage::ProductStore;
use std::sync::Arc;

/// Appends review copies into their owning product
pub struct ConsistencyCoordinator {
    products: Arc<dyn ProductStore>,
}

impl ConsistencyCoordinator {
    /// Create a coordinator writing through the given product store
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Append `review` to the end of the owning product's embedded
    /// sequence and persist the whole product.
    ///
    /// This is an append, not an upsert: a review id already present in
    /// the sequence is appended again. Fails with a product not-found
    /// error when `product_id` has no backing record.
    pub async fn attach_review(&self, product_id: &str, review: Review) -> Result<Product> {
        let mut product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| Error::product_not_found(product_id))?;

        product.reviews.push(review);
        tracing::debug!(
            product_id,
            embedded = product.reviews.len(),
            "attaching review copy"
        );
        self.products.put(product).await
    }
}
