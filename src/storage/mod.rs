//! Storage layer: abstract record stores and in-memory implementations

pub mod product_store;
pub mod review_store;

pub use product_store::*;
pub use review_store::*;
