//! Typed errors for the site store.
//!
//! Normalization is total and never appears here; every rejection comes
//! from a uniqueness check, schema validation or the storage backend.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::ValidationIssue;

/// Errors returned by [`crate::SiteStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored site matches the slug
    #[error("site not found: {slug}")]
    NotFound { slug: String },

    /// The resolved slug is already held by another site
    #[error("slug already exists: {slug}")]
    Conflict { slug: String },

    /// Payload failed schema validation; carries every violation
    #[error("invalid site payload ({} issue(s))", .0.len())]
    Invalid(Vec<ValidationIssue>),

    /// Underlying read or write failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Validation issues, if this is an `Invalid` error.
    pub fn issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            StoreError::Invalid(issues) => Some(issues),
            _ => None,
        }
    }
}

/// Errors from a [`crate::SiteStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored collection is not a JSON array of objects
    #[error("corrupt site collection in {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record could not be read as a site
    #[error("stored record {index} is not a valid site: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Collection could not be serialized
    #[error("failed to serialize site collection: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors loading or compiling the card/site schemas at startup.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema file could not be read
    #[error("failed to read schema {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema file is not valid JSON
    #[error("schema {name} is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Schema is not a valid JSON Schema document
    #[error("failed to compile schema {name}: {reason}")]
    Compile { name: String, reason: String },
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Result type alias for storage backends.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
