//! Error types for Catalog-DB

use std::fmt;
use thiserror::Error;

/// Result type alias for Catalog-DB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of record a failed lookup referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Product,
    Review,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Product => write!(f, "Product"),
            RecordKind::Review => write!(f, "Review"),
        }
    }
}

/// Main error type for Catalog-DB
#[derive(Error, Debug)]
pub enum Error {
    /// Operation referenced an identifier with no backing record
    #[error("{kind} with id {id} not found")]
    NotFound { kind: RecordKind, id: String },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Not-found error for a product identifier
    pub fn product_not_found(id: impl Into<String>) -> Self {
        Error::NotFound {
            kind: RecordKind::Product,
            id: id.into(),
        }
    }

    /// Not-found error for a review identifier
    pub fn review_not_found(id: impl Into<String>) -> Self {
        Error::NotFound {
            kind: RecordKind::Review,
            id: id.into(),
        }
    }

    /// Whether this is a not-found error for the given record kind
    pub fn is_not_found(&self, kind: RecordKind) -> bool {
        matches!(self, Error::NotFound { kind: k, .. } if *k == kind)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
