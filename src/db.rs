//! Main catalog implementation

use crate::aggregate::{AggregationEngine, RatingSummary};
use crate::consistency::ConsistencyCoordinator;
use crate::core::product::{NewProduct, Product, ProductUpdate};
use crate::core::review::{NewReview, Review};
use crate::error::{Error, Result};
use crate::query::{filter_products, paginate, Page, ProductFilter};
use crate::storage::{InMemoryProductStore, InMemoryReviewStore, ProductStore, ReviewStore};
use std::sync::Arc;

/// Main catalog facade.
///
/// Exposes the catalog operations to an API layer it does not implement,
/// composing the two stores with the consistency coordinator and the
/// aggregation engine. Every operation is a chain of independently atomic
/// store calls; there is no cross-call transaction, and an abandoned
/// caller never rolls back a write that was already issued.
pub struct CatalogDB {
    products: Arc<dyn ProductStore>,
    reviews: Arc<dyn ReviewStore>,
    coordinator: ConsistencyCoordinator,
    aggregation: AggregationEngine,
}

impl CatalogDB {
    /// Create a catalog over in-memory stores
    pub fn in_memory() -> Self {
        Self::with_stores(
            Arc::new(InMemoryProductStore::new()),
            Arc::new(InMemoryReviewStore::new()),
        )
    }

    /// Create a catalog over the given store implementations
    pub fn with_stores(products: Arc<dyn ProductStore>, reviews: Arc<dyn ReviewStore>) -> Self {
        Self {
            coordinator: ConsistencyCoordinator::new(Arc::clone(&products)),
            aggregation: AggregationEngine::new(Arc::clone(&products)),
            products,
            reviews,
        }
    }

    /// Filtered, paginated product listing over the full scan
    pub async fn get_products_filtered(
        &self,
        filter: &ProductFilter,
        page: Page,
    ) -> Result<Vec<Product>> {
        let scan = self.products.scan_all().await?;
        tracing::debug!(scanned = scan.len(), "filtering product scan");
        Ok(filter_products(scan, filter, page))
    }

    /// Get a product by id
    pub async fn get_product_by_id(&self, id: &str) -> Result<Product> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| Error::product_not_found(id))
    }

    /// Add a product with a server-generated id and no reviews
    pub async fn add_product(&self, input: NewProduct) -> Result<Product> {
        let product = Product::new(input);
        tracing::info!(id = %product.id, "adding product");
        self.products.put(product).await
    }

    /// Replace a product's name, description, price and category.
    ///
    /// The embedded review sequence is carried over untouched; only the
    /// coordinator ever writes it.
    pub async fn update_product(&self, id: &str, update: ProductUpdate) -> Result<Product> {
        let existing = self.get_product_by_id(id).await?;
        let updated = Product {
            name: update.name,
            description: update.description,
            price: update.price,
            category: update.category,
            ..existing
        };
        self.products.put(updated).await
    }

    /// Delete a product by id.
    ///
    /// Returns `false` for a missing id; a second call behaves the same.
    /// Standalone reviews referencing the product are left in place, so
    /// deleting a product can orphan them.
    pub async fn delete_product(&self, id: &str) -> Result<bool> {
        if !self.products.exists(id).await? {
            return Ok(false);
        }
        self.products.delete(id).await
    }

    /// Mirror an already-created review into its owning product
    pub async fn add_review_to_product(&self, product_id: &str, review: Review) -> Result<Product> {
        self.coordinator.attach_review(product_id, review).await
    }

    /// Average rating of a product, computed from its embedded copies
    pub async fn get_product_average_rating(&self, id: &str) -> Result<RatingSummary> {
        self.aggregation.average_rating(id).await
    }

    /// Paginated standalone reviews owned by a product.
    ///
    /// An unknown product id yields an empty page, not an error.
    pub async fn get_reviews_by_product_id(
        &self,
        product_id: &str,
        page: Page,
    ) -> Result<Vec<Review>> {
        let owned = self.reviews.find_by_owner(product_id).await?;
        Ok(paginate(owned, page))
    }

    /// Get a standalone review by id
    pub async fn get_review_by_id(&self, id: &str) -> Result<Review> {
        self.reviews
            .get(id)
            .await?
            .ok_or_else(|| Error::review_not_found(id))
    }

    /// Add a review: persist the standalone record, then mirror it into
    /// the owning product.
    ///
    /// When the mirror write fails the standalone record stays in place
    /// and the error is surfaced; the two views diverge until a later
    /// attach re-saves the product. That window is part of the contract,
    /// not rolled back.
    pub async fn add_review(&self, input: NewReview) -> Result<Review> {
        let review = Review::new(input);
        tracing::info!(id = %review.id, product_id = %review.product_id, "adding review");
        let saved = self.reviews.put(review).await?;
        self.coordinator
            .attach_review(&saved.product_id, saved.clone())
            .await?;
        Ok(saved)
    }

    /// Replace a review's rating and comment on the standalone record.
    ///
    /// The embedded copy inside the owning product is deliberately left
    /// stale; only attach-time writes touch it.
    pub async fn update_review(&self, id: &str, rating: i32, comment: String) -> Result<Review> {
        let existing = self
            .reviews
            .get(id)
            .await?
            .ok_or_else(|| Error::review_not_found(id))?;
        let updated = Review {
            rating,
            comment,
            ..existing
        };
        self.reviews.put(updated).await
    }

    /// Delete the standalone review record.
    ///
    /// Returns `false` for a missing id; a second call behaves the same.
    /// The embedded copy inside the owning product is left in place.
    pub async fn delete_review(&self, id: &str) -> Result<bool> {
        if !self.reviews.exists(id).await? {
            return Ok(false);
        }
        self.reviews.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordKind;
    use crate::storage::MockProductStore;

    fn new_product(name: &str, price: f64, category: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category: category.to_string(),
        }
    }

    fn new_review(product_id: &str, author: &str, rating: i32) -> NewReview {
        NewReview {
            product_id: product_id.to_string(),
            author: author.to_string(),
            rating,
            comment: "ok".to_string(),
        }
    }

    #[tokio::test]
    async fn average_rating_reflects_attached_reviews() {
        let db = CatalogDB::in_memory();
        let product = db
            .add_product(new_product("Lamp", 25.0, "Home"))
            .await
            .unwrap();

        db.add_review(new_review(&product.id, "alice", 5)).await.unwrap();
        db.add_review(new_review(&product.id, "bob", 2)).await.unwrap();

        let summary = db.get_product_average_rating(&product.id).await.unwrap();
        assert_eq!(summary.review_count, 2);
        assert!((summary.average - 3.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn mirroring_an_existing_review_updates_the_embedded_sequence() {
        let db = CatalogDB::in_memory();
        let product = db
            .add_product(new_product("Lamp", 25.0, "Home"))
            .await
            .unwrap();

        let review = Review::new(new_review(&product.id, "alice", 5));
        let updated = db
            .add_review_to_product(&product.id, review.clone())
            .await
            .unwrap();

        assert_eq!(updated.reviews.len(), 1);
        assert_eq!(updated.reviews[0].id, review.id);

        let err = db
            .add_review_to_product("missing", review)
            .await
            .unwrap_err();
        assert!(err.is_not_found(RecordKind::Product));
    }

    #[tokio::test]
    async fn update_product_preserves_the_embedded_sequence() {
        let db = CatalogDB::in_memory();
        let product = db
            .add_product(new_product("Lamp", 25.0, "Home"))
            .await
            .unwrap();
        db.add_review(new_review(&product.id, "alice", 4)).await.unwrap();

        let updated = db
            .update_product(
                &product.id,
                ProductUpdate {
                    name: "Desk lamp".to_string(),
                    description: "Updated".to_string(),
                    price: 30.0,
                    category: "Office".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Desk lamp");
        assert_eq!(updated.reviews.len(), 1);
        assert_eq!(updated.id, product.id);
    }

    #[tokio::test]
    async fn update_review_leaves_the_embedded_copy_stale() {
        let db = CatalogDB::in_memory();
        let product = db
            .add_product(new_product("Lamp", 25.0, "Home"))
            .await
            .unwrap();
        let review = db.add_review(new_review(&product.id, "alice", 2)).await.unwrap();

        let updated = db
            .update_review(&review.id, 5, "Much better".to_string())
            .await
            .unwrap();
        assert_eq!(updated.rating, 5);

        // The standalone record moved, the embedded copy did not.
        let embedded = &db.get_product_by_id(&product.id).await.unwrap().reviews;
        assert_eq!(embedded.len(), 1);
        assert_eq!(embedded[0].rating, 2);
        let summary = db.get_product_average_rating(&product.id).await.unwrap();
        assert!((summary.average - 2.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn delete_review_leaves_the_embedded_copy_in_place() {
        let db = CatalogDB::in_memory();
        let product = db
            .add_product(new_product("Lamp", 25.0, "Home"))
            .await
            .unwrap();
        let review = db.add_review(new_review(&product.id, "alice", 4)).await.unwrap();

        assert!(db.delete_review(&review.id).await.unwrap());
        assert!(!db.delete_review(&review.id).await.unwrap());

        let err = db.get_review_by_id(&review.id).await.unwrap_err();
        assert!(err.is_not_found(RecordKind::Review));
        assert_eq!(
            db.get_product_by_id(&product.id).await.unwrap().reviews.len(),
            1
        );
    }

    #[tokio::test]
    async fn delete_product_is_idempotent_and_orphans_reviews() {
        let db = CatalogDB::in_memory();
        let product = db
            .add_product(new_product("Lamp", 25.0, "Home"))
            .await
            .unwrap();
        db.add_review(new_review(&product.id, "alice", 4)).await.unwrap();

        assert!(db.delete_product(&product.id).await.unwrap());
        assert!(!db.delete_product(&product.id).await.unwrap());
        assert!(!db.delete_product("never-existed").await.unwrap());

        // No cascade: the standalone review outlives its product.
        let orphans = db
            .get_reviews_by_product_id(&product.id, Page::default())
            .await
            .unwrap();
        assert_eq!(orphans.len(), 1);
    }

    #[tokio::test]
    async fn listing_filters_and_paginates_the_scan() {
        let db = CatalogDB::in_memory();
        db.add_product(new_product("TV", 1500.0, "Electronics"))
            .await
            .unwrap();
        db.add_product(new_product("Radio", 300.0, "Electronics"))
            .await
            .unwrap();
        db.add_product(new_product("Sofa", 900.0, "Furniture"))
            .await
            .unwrap();

        let filter = ProductFilter {
            category: Some("Electronics".to_string()),
            min_price: Some(1000.0),
            ..Default::default()
        };
        let result = db.get_products_filtered(&filter, Page::default()).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "TV");

        let electronics = ProductFilter {
            category: Some("Electronics".to_string()),
            ..Default::default()
        };
        let first = db
            .get_products_filtered(&electronics, Page::new(0, 1))
            .await
            .unwrap();
        let second = db
            .get_products_filtered(&electronics, Page::new(1, 1))
            .await
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_ne!(first[0].id, second[0].id);
    }

    #[tokio::test]
    async fn review_listing_pages_by_owner() {
        let db = CatalogDB::in_memory();
        let product = db
            .add_product(new_product("Lamp", 25.0, "Home"))
            .await
            .unwrap();
        for i in 0..3 {
            db.add_review(new_review(&product.id, &format!("author-{i}"), 3))
                .await
                .unwrap();
        }

        let page = db
            .get_reviews_by_product_id(&product.id, Page::new(0, 2))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        let rest = db
            .get_reviews_by_product_id(&product.id, Page::new(1, 2))
            .await
            .unwrap();
        assert_eq!(rest.len(), 1);

        // Unknown owner is an empty page, not an error.
        assert!(db
            .get_reviews_by_product_id("missing", Page::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn add_review_for_missing_product_fails_and_keeps_the_standalone_record() {
        let db = CatalogDB::in_memory();

        let err = db
            .add_review(new_review("missing", "alice", 4))
            .await
            .unwrap_err();
        assert!(err.is_not_found(RecordKind::Product));

        // The standalone write happened before the failed mirror write.
        let orphans = db
            .get_reviews_by_product_id("missing", Page::default())
            .await
            .unwrap();
        assert_eq!(orphans.len(), 1);
    }

    #[tokio::test]
    async fn failed_mirror_write_surfaces_and_keeps_the_standalone_record() {
        let product = Product::new(new_product("Lamp", 25.0, "Home"));
        let product_id = product.id.clone();

        let mut products = MockProductStore::new();
        products
            .expect_get()
            .returning(move |_| Ok(Some(product.clone())));
        products
            .expect_put()
            .returning(|_| Err(Error::Storage("write failed".to_string())));

        let db = CatalogDB::with_stores(Arc::new(products), Arc::new(InMemoryReviewStore::new()));

        let err = db
            .add_review(new_review(&product_id, "alice", 4))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)));

        let standalone = db
            .get_reviews_by_product_id(&product_id, Page::default())
            .await
            .unwrap();
        assert_eq!(standalone.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_review_adds_keep_every_standalone_record() {
        const WRITERS: usize = 8;

        let db = Arc::new(CatalogDB::in_memory());
        let product = db
            .add_product(new_product("Lamp", 25.0, "Home"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let db = Arc::clone(&db);
                let product_id = product.id.clone();
                tokio::spawn(async move {
                    db.add_review(new_review(&product_id, &format!("author-{i}"), 4))
                        .await
                })
            })
            .collect();
        for joined in futures::future::join_all(handles).await {
            joined.unwrap().unwrap();
        }

        let standalone = db
            .get_reviews_by_product_id(&product.id, Page::new(0, WRITERS * 2))
            .await
            .unwrap();
        assert_eq!(standalone.len(), WRITERS);

        // The embedded sequence may have lost entries to the documented
        // read-modify-write race, but never holds more than one per add
        // and never ends up empty.
        let embedded = db.get_product_by_id(&product.id).await.unwrap().reviews;
        assert!((1..=WRITERS).contains(&embedded.len()));

        let summary = db.get_product_average_rating(&product.id).await.unwrap();
        assert_eq!(summary.review_count, embedded.len());
        assert!((summary.average - 4.0).abs() < f64::EPSILON);
    }
}
