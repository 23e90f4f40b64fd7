//! Theme types and the fallback cascade.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_BG: &str = "#ffffff";
pub const DEFAULT_HIGHLIGHT: &str = "#2563eb";
pub const DEFAULT_SECONDARY: &str = "#000000";
pub const DEFAULT_FONT: &str = "inter";

/// Theme as stored on a site.
///
/// Older payloads name colours `background`, `accent` and `primary`; those
/// are kept as written and only consulted by [`Theme::resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fully resolved theme: every field has a value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub bg: String,
    pub highlight: String,
    pub secondary: String,
    pub font: String,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        Self {
            bg: DEFAULT_BG.to_string(),
            highlight: DEFAULT_HIGHLIGHT.to_string(),
            secondary: DEFAULT_SECONDARY.to_string(),
            font: DEFAULT_FONT.to_string(),
        }
    }
}

impl Theme {
    /// Resolve each field through its alias chain, falling back to the
    /// default table. Empty strings count as missing.
    pub fn resolve(&self) -> ResolvedTheme {
        ResolvedTheme {
            bg: first_set(&[&self.bg, &self.background, &self.primary], DEFAULT_BG),
            highlight: first_set(
                &[&self.highlight, &self.accent, &self.secondary],
                DEFAULT_HIGHLIGHT,
            ),
            secondary: first_set(&[&self.secondary, &self.primary], DEFAULT_SECONDARY),
            font: first_set(&[&self.font], DEFAULT_FONT),
        }
    }
}

/// Resolve an optional theme; a missing theme yields the defaults.
pub fn resolve_theme(theme: Option<&Theme>) -> ResolvedTheme {
    theme.map(Theme::resolve).unwrap_or_default()
}

fn first_set(candidates: &[&Option<String>], fallback: &str) -> String {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
