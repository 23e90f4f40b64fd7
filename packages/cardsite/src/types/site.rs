//! Site types.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::card::Card;
use super::theme::{resolve_theme, ResolvedTheme, Theme};

/// Publication status of a site.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    #[default]
    Draft,
    Published,
}

impl std::fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteStatus::Draft => write!(f, "draft"),
            SiteStatus::Published => write!(f, "published"),
        }
    }
}

/// Optional site metadata. `slug` is the legacy location of the site slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Site - a persisted website assembled from cards.
///
/// Fields outside the declared model are kept in `extra` so a stored record
/// round-trips without loss.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Site {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    /// Unique, URL-safe identifier (`^[a-z0-9-]+$`)
    #[serde(default)]
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SiteStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    #[serde(default)]
    pub cards: Vec<Card>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SiteMeta>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Listing projection of a site. Never carries card content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub status: SiteStatus,
}

impl Site {
    /// Exact, case-sensitive match against `slug` or `meta.slug`.
    pub fn matches_slug(&self, slug: &str) -> bool {
        if slug.is_empty() {
            return false;
        }
        self.slug == slug
            || self
                .meta
                .as_ref()
                .and_then(|m| m.slug.as_deref())
                .is_some_and(|s| s == slug)
    }

    pub fn summary(&self) -> SiteSummary {
        SiteSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            slug: self.slug.clone(),
            status: self.status.unwrap_or_default(),
        }
    }

    /// Cards in render order: ascending `order`, ties keep array position.
    pub fn ordered_cards(&self) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.iter().collect();
        // sort_by_key is stable
        cards.sort_by_key(|c| c.sort_key());
        cards
    }

    pub fn resolved_theme(&self) -> ResolvedTheme {
        resolve_theme(self.theme.as_ref())
    }

    /// Fill in `meta.createdAt` / `meta.updatedAt` when absent.
    pub fn stamp_timestamps(&mut self, now: &str) {
        let meta = self.meta.get_or_insert_with(SiteMeta::default);
        if meta.created_at.is_none() {
            meta.created_at = Some(now.to_string());
        }
        if meta.updated_at.is_none() {
            meta.updated_at = Some(now.to_string());
        }
    }

    /// Assign a fresh `site-<uuid>` id when the payload carried none.
    pub fn ensure_id(&mut self) {
        if self.id.as_deref().map_or(true, str::is_empty) {
            self.id = Some(format!("site-{}", uuid::Uuid::new_v4()));
        }
    }
}

/// Current time in the format stored in `meta` timestamps.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
