//! Pass: resolve the site slug from the legacy `meta.slug` location
//!
//! - Top-level `slug` absent or blank, `meta.slug` set: copy `meta.slug` up
//! - Both set and different: the top-level value is explicit, rewrite `meta.slug`
//!
//! A missing `meta` object is never created.

use serde_json::Value;

use super::{is_blank, NormalizationPass};

pub struct SlugFromMeta;

impl NormalizationPass for SlugFromMeta {
    fn name(&self) -> &'static str {
        "slug_from_meta"
    }

    fn since_version(&self) -> u32 {
        1
    }

    fn description(&self) -> &'static str {
        "Copy meta.slug to slug when slug is missing; keep meta.slug in sync with slug"
    }

    fn apply(&self, site: &mut Value) -> bool {
        let Some(obj) = site.as_object_mut() else {
            return false;
        };

        let meta_slug = obj
            .get("meta")
            .and_then(|m| m.get("slug"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if is_blank(obj.get("slug")) {
            return match meta_slug {
                Some(slug) => {
                    obj.insert("slug".to_string(), Value::String(slug));
                    true
                }
                None => false,
            };
        }

        let Some(top) = obj.get("slug").and_then(Value::as_str).map(str::to_string) else {
            // Non-string slug: left for validation to report
            return false;
        };

        match (meta_slug, obj.get_mut("meta").and_then(Value::as_object_mut)) {
            (Some(existing), Some(meta)) if existing != top => {
                meta.insert("slug".to_string(), Value::String(top));
                true
            }
            _ => false,
        }
    }
}
