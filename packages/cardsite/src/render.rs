//! Render plan: what a viewer needs to draw a site.
//!
//! Combines the resolved theme with the cards in render order. Each card is
//! turned into a typed [`CardBody`]; cards that cannot be rendered become an
//! `unsupported` placeholder block instead of failing the whole plan.

use serde::Serialize;

use crate::types::card::{Card, CardBody};
use crate::types::site::{Site, SiteStatus};
use crate::types::theme::ResolvedTheme;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderPlan {
    pub slug: String,
    pub name: String,
    pub status: SiteStatus,
    pub theme: ResolvedTheme,
    pub blocks: Vec<RenderBlock>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Index of the card in the site's stored `cards` array
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(flatten)]
    pub body: CardBody,
}

impl RenderPlan {
    pub fn for_site(site: &Site) -> Self {
        let mut indexed: Vec<(usize, &Card)> = site.cards.iter().enumerate().collect();
        indexed.sort_by_key(|(_, card)| card.sort_key());

        let blocks = indexed
            .into_iter()
            .map(|(position, card)| RenderBlock {
                id: card.id.clone(),
                position,
                visibility: card.visibility.clone(),
                body: card.body(),
            })
            .collect();

        Self {
            slug: site.slug.clone(),
            name: site.name.clone(),
            status: site.status.unwrap_or_default(),
            theme: site.resolved_theme(),
            blocks,
        }
    }

    pub fn unsupported_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.body.is_supported()).count()
    }
}
