//! Product records and their creation/update inputs

use crate::core::review::Review;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog product with its denormalized review copies.
///
/// The `reviews` sequence is a cache of the standalone review records kept
/// up to date by the consistency coordinator. It is a value, not a
/// reference: it has no lifecycle of its own and is overwritten wholesale
/// whenever the product is re-saved. The standalone records remain the
/// source of truth for any individual review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Opaque identifier, generated on creation
    pub id: String,
    pub name: String,
    pub description: String,
    /// Non-negative by convention, not validated
    pub price: f64,
    /// Free-text label, matched case-sensitively by queries
    pub category: String,
    /// Embedded review copies, in attach order
    pub reviews: Vec<Review>,
}

impl Product {
    /// Create a product with a freshly generated id and no reviews
    pub fn new(input: NewProduct) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            reviews: Vec::new(),
        }
    }
}

/// Input for creating a product; the id is server-generated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}

/// Replacement values for an update; the embedded reviews are untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}
