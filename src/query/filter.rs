//! Product filtering and pagination.
//!
//! Queries run over the full, unordered product scan and apply in-memory
//! predicates: cost is O(total products) per call. There is no index and
//! no precomputed category or price structure, and the scan order is
//! whatever the store yields.

use crate::core::product::Product;
use serde::{Deserialize, Serialize};

/// Page size used when the caller leaves it unset
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Predicate over products.
///
/// Unset fields match everything. The category comparison is exact and
/// case-sensitive, with no normalization; the price range is inclusive on
/// both ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Whether the product satisfies every set field
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |category| product.category == category);
        let min_ok = self.min_price.map_or(true, |min| product.price >= min);
        let max_ok = self.max_price.map_or(true, |max| product.price <= max);
        category_ok && min_ok && max_ok
    }
}

/// Pagination window: skip `page * size` matching records, take `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: usize,
    pub size: usize,
}

impl Page {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Number of matching records skipped before the window starts
    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Apply a pagination window to an already-ordered record sequence
pub fn paginate<T>(records: Vec<T>, page: Page) -> Vec<T> {
    records
        .into_iter()
        .skip(page.offset())
        .take(page.size)
        .collect()
}

/// Filter a full product scan, then apply the pagination window.
///
/// Skipping counts matching records only, so consecutive pages partition
/// the filtered sequence.
pub fn filter_products(products: Vec<Product>, filter: &ProductFilter, page: Page) -> Vec<Product> {
    let matching: Vec<Product> = products
        .into_iter()
        .filter(|product| filter.matches(product))
        .collect();
    paginate(matching, page)
}
