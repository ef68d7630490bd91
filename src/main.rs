//! Catalog-DB: Main entry point

use anyhow::Context;
use catalog_db::cli::{Cli, Commands};
use catalog_db::core::{NewProduct, NewReview};
use catalog_db::db::CatalogDB;
use catalog_db::query::{Page, ProductFilter};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            category,
            min_price,
            max_price,
            page,
            size,
        } => {
            let db = CatalogDB::in_memory();
            seed_demo_catalog(&db).await.context("seeding demo catalog")?;

            let filter = ProductFilter {
                category,
                min_price,
                max_price,
            };
            let products = db
                .get_products_filtered(&filter, Page::new(page, size))
                .await?;

            if products.is_empty() {
                println!("no products match the filter");
                return Ok(());
            }
            for product in &products {
                let summary = db.get_product_average_rating(&product.id).await?;
                println!("{}", serde_json::to_string_pretty(product)?);
                println!(
                    "average rating: {:.2} ({} reviews)\n",
                    summary.average, summary.review_count
                );
            }
            Ok(())
        }
    }
}

/// Seed a small catalog so the listing has something to show
async fn seed_demo_catalog(db: &CatalogDB) -> catalog_db::error::Result<()> {
    let laptop = db
        .add_product(NewProduct {
            name: "Laptop".to_string(),
            description: "14-inch ultrabook".to_string(),
            price: 1499.0,
            category: "Electronics".to_string(),
        })
        .await?;
    let radio = db
        .add_product(NewProduct {
            name: "Radio".to_string(),
            description: "FM/DAB receiver".to_string(),
            price: 300.0,
            category: "Electronics".to_string(),
        })
        .await?;
    db.add_product(NewProduct {
        name: "Sofa".to_string(),
        description: "Three-seater".to_string(),
        price: 900.0,
        category: "Furniture".to_string(),
    })
    .await?;

    db.add_review(NewReview {
        product_id: laptop.id.clone(),
        author: "alice".to_string(),
        rating: 5,
        comment: "Great battery life".to_string(),
    })
    .await?;
    db.add_review(NewReview {
        product_id: laptop.id,
        author: "bob".to_string(),
        rating: 4,
        comment: "Runs warm under load".to_string(),
    })
    .await?;
    db.add_review(NewReview {
        product_id: radio.id,
        author: "carol".to_string(),
        rating: 3,
        comment: "Reception is average".to_string(),
    })
    .await?;

    Ok(())
}
