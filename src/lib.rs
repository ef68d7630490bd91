//! Catalog-DB: product catalog with denormalized review copies
//!
//! A product catalog core built around two record types, products and
//! reviews, where every review is also embedded as a copy inside its
//! owning product.
//!
//! # Core Concepts
//!
//! - **Stores**: abstract keyed persistence for products and reviews,
//!   atomic per record only
//! - **Consistency coordinator**: mirrors newly created reviews into the
//!   owning product's embedded sequence
//! - **Aggregation**: average rating computed from the embedded copies
//! - **Queries**: filtered, paginated listings over an unindexed scan
//!
//! # Example
//!
//! ```no_run
//! use catalog_db::prelude::*;
//!
//! # async fn example() -> catalog_db::error::Result<()> {
//! let db = CatalogDB::in_memory();
//!
//! // Add a product
//! let product = db
//!     .add_product(NewProduct {
//!         name: "Laptop".to_string(),
//!         description: "14-inch ultrabook".to_string(),
//!         price: 1499.0,
//!         category: "Electronics".to_string(),
//!     })
//!     .await?;
//!
//! // Review it and read the aggregate
//! db.add_review(NewReview {
//!     product_id: product.id.clone(),
//!     author: "alice".to_string(),
//!     rating: 5,
//!     comment: "Great battery life".to_string(),
//! })
//! .await?;
//! let summary = db.get_product_average_rating(&product.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cli;
pub mod consistency;
pub mod core;
pub mod error;
pub mod query;
pub mod storage;

/// Main catalog type
pub mod db;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::aggregate::{AggregationEngine, RatingSummary};
    pub use crate::consistency::ConsistencyCoordinator;
    pub use crate::core::*;
    pub use crate::db::CatalogDB;
    pub use crate::error::{Error, RecordKind, Result};
    pub use crate::query::{Page, ProductFilter};
    pub use crate::storage::*;
}
