//! Average-rating aggregation over embedded review copies.
//!
//! The engine reads only the product store: the mean is computed from the
//! embedded sequence and is exactly as fresh as the last successful
//! attach. It never re-joins against the standalone review records.

use crate::error::{Error, Result};
use crate::storage::ProductStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Aggregated rating for one product.
///
/// `review_count` distinguishes "no reviews yet" from a genuine all-zero
/// rating set: an empty embedded sequence yields an average of `0.0` with
/// a count of `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub review_count: usize,
}

impl RatingSummary {
    /// Summary for a product without any embedded reviews
    pub fn empty() -> Self {
        Self {
            average: 0.0,
            review_count: 0,
        }
    }
}

/// Computes derived rating metrics from embedded review copies
pub struct AggregationEngine {
    products: Arc<dyn ProductStore>,
}

impl AggregationEngine {
    /// Create an engine reading from the given product store
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Arithmetic mean of the embedded review ratings.
    ///
    /// Fails with a product not-found error when the product is absent;
    /// never fails for an existing product, whatever its review count.
    pub async fn average_rating(&self, product_id: &str) -> Result<RatingSummary> {
        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| Error::product_not_found(product_id))?;

        let review_count = product.reviews.len();
        if review_count == 0 {
            return Ok(RatingSummary::empty());
        }

        let total: i64 = product.reviews.iter().map(|r| i64::from(r.rating)).sum();
        Ok(RatingSummary {
            average: total as f64 / review_count as f64,
            review_count,
        })
    }
}
