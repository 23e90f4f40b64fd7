//! Storage implementations for the site collection.
//!
//! Available backends:
//! - `JsonFileStorage` - single JSON array file with atomic replace
//! - `MemoryStorage` - in-process storage for tests and development

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
