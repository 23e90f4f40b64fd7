//! Core trait abstractions.

pub mod storage;

pub use storage::SiteStorage;
