//! Card-based site assembly core
//!
//! Owns the site/card data model and everything with real invariants around
//! it: legacy-shape normalization, schema validation, slug uniqueness and the
//! persistence contract for the stored site collection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cardsite::{JsonFileStorage, SiteStore, SiteValidator};
//!
//! let validator = Arc::new(SiteValidator::bundled()?);
//! let store = SiteStore::new(JsonFileStorage::new("data/sites.json"), validator);
//!
//! let site = store.create(serde_json::json!({"name": "Test", "slug": "test", "cards": []})).await?;
//! let same = store.get("test").await?;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Site, card and theme data types
//! - [`normalize`] - Versioned passes resolving legacy payload shapes
//! - [`schema`] - Compiled card/site JSON schemas
//! - [`traits`] - Storage abstraction
//! - [`stores`] - Storage implementations (JsonFileStorage, MemoryStorage)
//! - [`site_store`] - CRUD semantics over the stored collection
//! - [`render`] - Render plan: resolved theme plus ordered card blocks
//! - [`testing`] - Payload fixtures for tests

pub mod error;
pub mod normalize;
pub mod render;
pub mod schema;
pub mod site_store;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

pub use error::{SchemaError, StorageError, StoreError};
pub use normalize::{normalize, NormalizationPass, NormalizeReport, NORMALIZATION_VERSION};
pub use render::{RenderBlock, RenderPlan};
pub use schema::{SiteValidator, ValidationIssue, ValidationResult};
pub use site_store::SiteStore;
pub use stores::{JsonFileStorage, MemoryStorage};
pub use traits::storage::SiteStorage;
pub use types::{
    card::{Card, CardBody, CardKind},
    site::{Site, SiteMeta, SiteStatus, SiteSummary},
    theme::{ResolvedTheme, Theme},
};
