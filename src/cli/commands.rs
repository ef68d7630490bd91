//! CLI commands

use clap::{Parser, Subcommand};

/// Catalog-DB CLI
#[derive(Parser)]
#[command(name = "catalog-db")]
#[command(about = "Product catalog with denormalized review copies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed a demo catalog and print a filtered listing with ratings
    Demo {
        /// Category to keep (exact, case-sensitive)
        #[arg(short, long)]
        category: Option<String>,
        /// Minimum price (inclusive)
        #[arg(long)]
        min_price: Option<f64>,
        /// Maximum price (inclusive)
        #[arg(long)]
        max_price: Option<f64>,
        /// Page number
        #[arg(short, long, default_value_t = 0)]
        page: usize,
        /// Records per page
        #[arg(short, long, default_value_t = 10)]
        size: usize,
    },
}
