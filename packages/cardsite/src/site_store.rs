//! Site Store - CRUD semantics over the persisted site collection.
//!
//! Write path: normalize → uniqueness check → schema validation → persist.
//! Reads normalize every stored record on the way out.
//!
//! Slug lookups and uniqueness checks run on the normalized raw records;
//! only the record being returned or written is decoded into a [`Site`].
//! A stored record that no longer fits the model therefore only affects
//! requests for that record, and is written back untouched on save.
//!
//! Every operation re-reads the backend; nothing is cached between calls.
//! Mutations hold a single async mutex across read-modify-write so that two
//! writers inside one process are serialized rather than interleaved. There
//! is no versioning: the last completed write wins.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Result, StorageError, StoreError};
use crate::normalize::{normalize, normalize_in_place};
use crate::schema::{SiteValidator, ValidationIssue, ValidationResult};
use crate::traits::storage::SiteStorage;
use crate::types::site::{timestamp_now, Site, SiteSummary};

/// Per-record result of a normalization rewrite.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NormalizeOutcome {
    pub index: usize,
    pub slug: String,
    pub applied: Vec<&'static str>,
}

/// Per-record result of a validation audit.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuditEntry {
    pub index: usize,
    pub slug: String,
    pub issues: Vec<ValidationIssue>,
}

pub struct SiteStore<S> {
    storage: S,
    validator: Arc<SiteValidator>,
    write_lock: Mutex<()>,
}

impl<S: SiteStorage> SiteStore<S> {
    pub fn new(storage: S, validator: Arc<SiteValidator>) -> Self {
        Self {
            storage,
            validator,
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn validator(&self) -> &SiteValidator {
        &self.validator
    }

    /// Find a site by slug (matches `slug` or `meta.slug`, case-sensitive).
    ///
    /// Fails with a storage error only when the matching record itself
    /// cannot be read as a site.
    pub async fn get(&self, slug: &str) -> Result<Site> {
        let records = self.load_records().await?;
        let (index, raw) = records
            .into_iter()
            .enumerate()
            .find(|(_, raw)| record_matches_slug(raw, slug))
            .ok_or_else(|| StoreError::NotFound {
                slug: slug.to_string(),
            })?;
        site_from_record(index, raw)
    }

    /// Summaries of every stored site, in stored order.
    ///
    /// Records that cannot be read as a site are skipped with a warning;
    /// `audit` reports them.
    pub async fn list(&self) -> Result<Vec<SiteSummary>> {
        let records = self.load_records().await?;
        Ok(records
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match site_from_record(index, raw) {
                Ok(site) => Some(site.summary()),
                Err(e) => {
                    warn!(index, error = %e, "Skipping unreadable site record in listing");
                    None
                }
            })
            .collect())
    }

    /// Create a new site from a raw payload.
    pub async fn create(&self, payload: Value) -> Result<Site> {
        let payload = normalize(payload);

        let _guard = self.write_lock.lock().await;
        let mut records = self.load_records().await?;

        if let Some(slug) = resolved_slug(&payload) {
            if records.iter().any(|raw| record_matches_slug(raw, slug)) {
                debug!(slug = %slug, "Rejecting create: slug already exists");
                return Err(StoreError::Conflict {
                    slug: slug.to_string(),
                });
            }
        }

        let mut site = self.validated(payload)?;
        site.ensure_id();
        site.stamp_timestamps(&timestamp_now());

        records.push(site_to_record(&site)?);
        self.storage.save(&records).await?;

        info!(slug = %site.slug, cards = site.cards.len(), "Created site");
        Ok(site)
    }

    /// Fully replace the site currently addressed by `slug`.
    ///
    /// The stored record keeps its position in the collection; nothing from
    /// the old record is merged into the new one.
    pub async fn replace(&self, slug: &str, payload: Value) -> Result<Site> {
        let payload = normalize(payload);

        let _guard = self.write_lock.lock().await;
        let mut records = self.load_records().await?;

        let index = records
            .iter()
            .position(|raw| record_matches_slug(raw, slug))
            .ok_or_else(|| StoreError::NotFound {
                slug: slug.to_string(),
            })?;

        if let Some(target) = resolved_slug(&payload) {
            let taken = records
                .iter()
                .enumerate()
                .any(|(i, raw)| i != index && record_matches_slug(raw, target));
            if taken {
                debug!(slug = %slug, target = %target, "Rejecting replace: slug held by another site");
                return Err(StoreError::Conflict {
                    slug: target.to_string(),
                });
            }
        }

        let mut site = self.validated(payload)?;
        site.stamp_timestamps(&timestamp_now());

        records[index] = site_to_record(&site)?;
        self.storage.save(&records).await?;

        info!(slug = %slug, new_slug = %site.slug, position = index, "Replaced site");
        Ok(site)
    }

    /// Rewrite the stored collection in canonical shape.
    ///
    /// With `dry_run` nothing is written; the outcomes still name every
    /// record a real run would change.
    pub async fn rewrite_normalized(&self, dry_run: bool) -> Result<Vec<NormalizeOutcome>> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.storage.load().await?;

        let mut outcomes = Vec::new();
        for (index, raw) in records.iter_mut().enumerate() {
            let report = normalize_in_place(raw);
            if report.changed() {
                outcomes.push(NormalizeOutcome {
                    index,
                    slug: resolved_slug(raw).unwrap_or_default().to_string(),
                    applied: report.applied,
                });
            }
        }

        if !dry_run && !outcomes.is_empty() {
            self.storage.save(&records).await?;
            info!(changed = outcomes.len(), "Rewrote site collection in canonical shape");
        }
        Ok(outcomes)
    }

    /// Validate every stored record against the current schemas.
    pub async fn audit(&self) -> Result<Vec<AuditEntry>> {
        let records = self.load_records().await?;
        Ok(records
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let slug = resolved_slug(&raw).unwrap_or_default().to_string();
                let mut issues = self.validator.validate(&raw).issues().to_vec();
                if issues.is_empty() {
                    if let Err(e) = serde_json::from_value::<Site>(raw) {
                        issues.push(ValidationIssue::new("", e.to_string()));
                    }
                }
                AuditEntry { index, slug, issues }
            })
            .collect())
    }

    /// Stored records in canonical shape, still undecoded.
    async fn load_records(&self) -> Result<Vec<Value>> {
        let records = self.storage.load().await?;
        Ok(records.into_iter().map(normalize).collect())
    }

    fn validated(&self, payload: Value) -> Result<Site> {
        if let ValidationResult::Invalid(issues) = self.validator.validate(&payload) {
            debug!(issues = issues.len(), "Rejecting payload: schema validation failed");
            return Err(StoreError::Invalid(issues));
        }
        serde_json::from_value(payload)
            .map_err(|e| StoreError::Invalid(vec![ValidationIssue::new("", e.to_string())]))
    }
}

fn site_from_record(index: usize, raw: Value) -> Result<Site> {
    serde_json::from_value(raw).map_err(|source| StoreError::Storage(StorageError::Record { index, source }))
}

fn site_to_record(site: &Site) -> Result<Value> {
    serde_json::to_value(site).map_err(|e| StoreError::Storage(StorageError::Serialize(e)))
}

/// Exact, case-sensitive match of a normalized record against `slug` or
/// `meta.slug`. An empty slug never matches.
fn record_matches_slug(raw: &Value, slug: &str) -> bool {
    if slug.is_empty() {
        return false;
    }
    let top = raw.get("slug").and_then(Value::as_str);
    let meta = raw
        .get("meta")
        .and_then(|m| m.get("slug"))
        .and_then(Value::as_str);
    top == Some(slug) || meta == Some(slug)
}

/// Slug a normalized payload resolves to, if it carries a usable one.
fn resolved_slug(payload: &Value) -> Option<&str> {
    payload
        .get("slug")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
