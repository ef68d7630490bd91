//! Filtered, paginated queries over a full product scan

pub mod filter;

pub use filter::*;
