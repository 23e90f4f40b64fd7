//! Compiled card and site schemas.
//!
//! The site schema references the card schema for every element of `cards`,
//! so a violation inside a card is reported with its full instance path
//! (e.g. `/cards/2/content/images/0/src`).
//!
//! Schemas are loaded once at startup and never change afterwards; a
//! [`SiteValidator`] holds no mutable state and is shared behind an `Arc`.
//! Both schemas are open: properties they do not declare are accepted.

use std::path::Path;

use jsonschema::{Resource, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::SchemaError;

pub const CARD_SCHEMA_FILE: &str = "card.schema.json";
pub const SITE_SCHEMA_FILE: &str = "site.schema.json";

/// URI the site schema uses to reference the card schema when the card
/// document declares no `$id`.
pub const CARD_SCHEMA_URI: &str = "https://cardsite.dev/schemas/card.schema.json";

const BUNDLED_CARD_SCHEMA: &str = include_str!("../schemas/card.schema.json");
const BUNDLED_SITE_SCHEMA: &str = include_str!("../schemas/site.schema.json");

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// JSON pointer into the payload; empty for the root
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating a payload. `Invalid` carries every violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<ValidationIssue>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(issues) => issues,
        }
    }
}

/// Compiled site validator (site schema with the card schema registered).
pub struct SiteValidator {
    site: Validator,
    card: Validator,
}

impl std::fmt::Debug for SiteValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteValidator").finish_non_exhaustive()
    }
}

impl SiteValidator {
    /// Compile the schemas shipped with this crate.
    pub fn bundled() -> Result<Self, SchemaError> {
        let card = parse_schema(CARD_SCHEMA_FILE, BUNDLED_CARD_SCHEMA)?;
        let site = parse_schema(SITE_SCHEMA_FILE, BUNDLED_SITE_SCHEMA)?;
        Self::from_documents(card, site)
    }

    /// Load `card.schema.json` and `site.schema.json` from a directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let dir = dir.as_ref();
        let card = read_schema(&dir.join(CARD_SCHEMA_FILE))?;
        let site = read_schema(&dir.join(SITE_SCHEMA_FILE))?;
        Self::from_documents(card, site)
    }

    /// Compile already-parsed schema documents.
    pub fn from_documents(card: Value, site: Value) -> Result<Self, SchemaError> {
        let card_uri = card
            .get("$id")
            .and_then(Value::as_str)
            .unwrap_or(CARD_SCHEMA_URI)
            .to_string();

        let card_validator = jsonschema::validator_for(&card).map_err(|e| SchemaError::Compile {
            name: CARD_SCHEMA_FILE.to_string(),
            reason: e.to_string(),
        })?;

        let card_resource = Resource::from_contents(card).map_err(|e| SchemaError::Compile {
            name: CARD_SCHEMA_FILE.to_string(),
            reason: e.to_string(),
        })?;

        let site_validator = jsonschema::options()
            .with_resource(card_uri.as_str(), card_resource)
            .build(&site)
            .map_err(|e| SchemaError::Compile {
                name: SITE_SCHEMA_FILE.to_string(),
                reason: e.to_string(),
            })?;

        debug!(card_schema = %card_uri, "Compiled site and card schemas");

        Ok(Self {
            site: site_validator,
            card: card_validator,
        })
    }

    /// Validate a (normalized) site payload, collecting every violation.
    pub fn validate(&self, site: &Value) -> ValidationResult {
        collect(&self.site, site)
    }

    /// Validate a single card against the card schema.
    pub fn validate_card(&self, card: &Value) -> ValidationResult {
        collect(&self.card, card)
    }

    pub fn is_valid(&self, site: &Value) -> bool {
        self.site.is_valid(site)
    }
}

fn collect(validator: &Validator, instance: &Value) -> ValidationResult {
    let issues: Vec<ValidationIssue> = validator
        .iter_errors(instance)
        .map(|e| ValidationIssue::new(e.instance_path.to_string(), e.to_string()))
        .collect();

    if issues.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(issues)
    }
}

fn parse_schema(name: &str, raw: &str) -> Result<Value, SchemaError> {
    serde_json::from_str(raw).map_err(|source| SchemaError::Parse {
        name: name.to_string(),
        source,
    })
}

fn read_schema(path: &Path) -> Result<Value, SchemaError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_schema(&name, &raw)
}
