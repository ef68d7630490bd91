//! Review records and their creation input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standalone review record, the source of truth for a single review.
///
/// A copy of every review is also embedded inside its owning product; the
/// embedded copy is maintained at attach time only and can lag behind this
/// record after later updates or deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Opaque identifier, generated on creation
    pub id: String,
    /// Identifier of the owning product, never empty after creation
    pub product_id: String,
    pub author: String,
    /// 1 to 5 by convention, not validated
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Create a review with a generated id and the current timestamp
    pub fn new(input: NewReview) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id: input.product_id,
            author: input.author,
            rating: input.rating,
            comment: input.comment,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a review; id and timestamp are server-generated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub product_id: String,
    pub author: String,
    pub rating: i32,
    pub comment: String,
}
