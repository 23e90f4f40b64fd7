//! Payload fixtures for tests.
//!
//! Useful for exercising the store and the HTTP layer with realistic site
//! shapes without repeating large JSON literals.

use serde_json::{json, Value};

use crate::types::card::CardKind;

/// Smallest payload the schemas accept.
pub fn minimal_site(slug: &str) -> Value {
    json!({"name": format!("Site {}", slug), "slug": slug, "cards": []})
}

/// Payload in the pre-normalization shape: slug only under `meta`, card
/// content under `data`.
pub fn legacy_site(slug: &str) -> Value {
    json!({
        "name": format!("Legacy {}", slug),
        "status": "published",
        "meta": {"slug": slug, "description": "imported"},
        "cards": [
            {"id": "legacy-hero", "type": "hero", "order": 0, "data": {"headline": "Old headline"}},
            {"id": "legacy-text", "type": "text", "order": 1, "data": {"body": "Old body"}}
        ]
    })
}

/// A card of the given kind with representative content.
pub fn card(kind: &CardKind, order: i64) -> Value {
    let content = match kind {
        CardKind::Hero => json!({
            "headline": "Fresh every morning",
            "subheadline": "Neighbourhood bakery",
            "cta": {"label": "Visit", "target": "#contact"}
        }),
        CardKind::Text => json!({"title": "Story", "headline": "Since 1999", "body": "Family run."}),
        CardKind::Services => json!({
            "headline": "What we do",
            "services": [{"id": "s1", "title": "Catering", "description": "Events of any size"}]
        }),
        CardKind::About => json!({
            "headline": "About us",
            "text": "Bread and pastries.",
            "media": {"src": "https://img.example/shop.jpg", "alt": "Shop front"}
        }),
        CardKind::Gallery => json!({
            "headline": "Gallery",
            "images": [{"src": "https://img.example/1.jpg", "alt": "Loaf", "caption": "Sourdough"}]
        }),
        CardKind::Contact => json!({
            "headline": "Get in touch",
            "contactInfo": {"phone": "555-0100", "email": "hello@example.com", "socials": {"instagram": "https://instagram.com/bakery"}},
            "form": {"fields": [{"name": "message", "label": "Message", "type": "textarea", "required": true}], "submitLabel": "Send"}
        }),
        CardKind::Features => json!({
            "headline": "Why us",
            "items": [{"title": "Organic", "description": "Local flour", "icon": "leaf"}]
        }),
        CardKind::Quote => json!({"quote": "Best croissant in town", "author": "A regular"}),
        CardKind::Footer => json!({"text": "© Bakery", "links": [{"label": "Home", "url": "/"}]}),
        CardKind::Unknown(_) => json!({}),
    };

    json!({
        "id": format!("card-{}-{}", kind, order),
        "type": kind.as_str(),
        "order": order,
        "visibility": "public",
        "content": content
    })
}

/// A published site with one card of every catalog type.
pub fn full_site(slug: &str) -> Value {
    let cards: Vec<Value> = CardKind::CATALOG
        .iter()
        .enumerate()
        .map(|(i, kind)| card(kind, i as i64))
        .collect();

    json!({
        "id": format!("site-{}", slug),
        "name": format!("Full {}", slug),
        "slug": slug,
        "status": "published",
        "theme": {"bg": "#fffaf0", "highlight": "#b45309", "secondary": "#1f2937", "font": "inter"},
        "cards": cards
    })
}
