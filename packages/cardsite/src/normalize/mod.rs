//! Normalization passes for legacy payload shapes
//!
//! Every site payload goes through [`normalize`] at the boundary: before a
//! write is checked or validated, and on every read from storage. Nothing
//! else in the crate knows about field aliases.
//!
//! # Passes
//!
//! Passes run in registration order over the raw JSON value. Each pass must
//! be:
//! - Total: any JSON value is accepted, including non-objects, and nothing fails
//! - Idempotent: applying it to its own output changes nothing
//!
//! Adding a pass means adding a module, registering it in [`all_passes`] and
//! bumping [`NORMALIZATION_VERSION`].

pub mod card_data_to_content;
pub mod slug_from_meta;

use serde::Serialize;
use serde_json::Value;

/// Version of the pass set. Bumped whenever a pass is added or changed.
pub const NORMALIZATION_VERSION: u32 = 1;

/// A single aliasing rule applied to a raw site payload.
pub trait NormalizationPass: Send + Sync + 'static {
    /// Unique name for this pass (used in reports)
    fn name(&self) -> &'static str;

    /// Pass-set version that introduced this pass
    fn since_version(&self) -> u32;

    /// Optional description shown by the maintenance CLI
    fn description(&self) -> &'static str {
        ""
    }

    /// Rewrite `site` in place. Returns true if anything changed.
    fn apply(&self, site: &mut Value) -> bool;
}

/// Get all registered passes, in the order they run.
pub fn all_passes() -> Vec<Box<dyn NormalizationPass>> {
    vec![
        Box::new(slug_from_meta::SlugFromMeta),
        Box::new(card_data_to_content::CardDataToContent),
    ]
}

/// Which passes changed a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub applied: Vec<&'static str>,
}

impl NormalizeReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Run every pass over `site` in place.
pub fn normalize_in_place(site: &mut Value) -> NormalizeReport {
    let mut report = NormalizeReport::default();
    for pass in all_passes() {
        if pass.apply(site) {
            report.applied.push(pass.name());
        }
    }
    report
}

/// Normalize an owned payload.
pub fn normalize(mut site: Value) -> Value {
    normalize_in_place(&mut site);
    site
}

/// Treat `null` and `""` like an absent field.
pub(crate) fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<_> = all_passes().iter().map(|p| p.name()).collect();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
        assert!(all_passes().iter().all(|p| p.since_version() <= NORMALIZATION_VERSION));
    }

    #[test]
    fn test_normalize_legacy_payload() {
        let legacy = json!({
            "name": "Legacy",
            "meta": {"slug": "legacy"},
            "cards": [
                {"id": "c1", "type": "text", "data": {"body": "hello"}},
                {"id": "c2", "type": "quote", "content": {"quote": "kept"}, "data": {"quote": "dropped"}}
            ]
        });

        let mut value = legacy.clone();
        let report = normalize_in_place(&mut value);

        assert_eq!(report.applied, vec!["slug_from_meta", "card_data_to_content"]);
        assert_eq!(
            value,
            json!({
                "name": "Legacy",
                "slug": "legacy",
                "meta": {"slug": "legacy"},
                "cards": [
                    {"id": "c1", "type": "text", "content": {"body": "hello"}},
                    {"id": "c2", "type": "quote", "content": {"quote": "kept"}}
                ]
            })
        );
    }

    #[test]
    fn test_normalize_is_idempotent_on_legacy_shapes() {
        let legacy = json!({
            "meta": {"slug": "x"},
            "cards": [{"type": "hero", "data": {"headline": "Hi"}}, "not-a-card", null]
        });
        let once = normalize(legacy);
        let mut twice = once.clone();
        let report = normalize_in_place(&mut twice);

        assert_eq!(once, twice);
        assert!(!report.changed());
    }

    #[test]
    fn test_normalize_is_total_for_non_objects() {
        for value in [json!(null), json!(3), json!("site"), json!([1, 2]), json!({"cards": 7})] {
            assert_eq!(normalize(value.clone()), value);
        }
    }

    #[test]
    fn test_canonical_payload_is_untouched() {
        let canonical = json!({
            "name": "Test",
            "slug": "test",
            "cards": [{"type": "text", "content": {"body": "x"}, "order": 1}]
        });
        let mut value = canonical.clone();
        assert!(!normalize_in_place(&mut value).changed());
        assert_eq!(value, canonical);
    }
}
