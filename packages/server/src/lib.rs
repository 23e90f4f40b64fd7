// Card-based site builder - API Core
//
// HTTP surface over the `cardsite` store: site CRUD, render plans and
// health checks. All data rules (normalization, validation, slug
// uniqueness, persistence) live in the `cardsite` crate.

pub mod config;
pub mod server;

pub use config::*;
