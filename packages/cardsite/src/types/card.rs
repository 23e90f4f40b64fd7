//! Card types.
//!
//! A card's `type` tag selects the shape of its `content`. The tag is kept as
//! a [`CardKind`] so unknown tags survive storage untouched; [`Card::body`]
//! turns the loosely typed content into a [`CardBody`] when it is rendered.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Card type tag. Unknown tags are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardKind {
    Hero,
    Text,
    Services,
    About,
    Gallery,
    Contact,
    Features,
    Quote,
    Footer,
    Unknown(String),
}

impl CardKind {
    /// Every renderable card type, in builder order.
    pub const CATALOG: [CardKind; 9] = [
        CardKind::Hero,
        CardKind::Text,
        CardKind::Services,
        CardKind::About,
        CardKind::Gallery,
        CardKind::Contact,
        CardKind::Features,
        CardKind::Quote,
        CardKind::Footer,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CardKind::Hero => "hero",
            CardKind::Text => "text",
            CardKind::Services => "services",
            CardKind::About => "about",
            CardKind::Gallery => "gallery",
            CardKind::Contact => "contact",
            CardKind::Features => "features",
            CardKind::Quote => "quote",
            CardKind::Footer => "footer",
            CardKind::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CardKind::Unknown(_))
    }
}

impl Default for CardKind {
    fn default() -> Self {
        CardKind::Unknown(String::new())
    }
}

impl From<String> for CardKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "hero" => CardKind::Hero,
            "text" => CardKind::Text,
            "services" => CardKind::Services,
            "about" => CardKind::About,
            "gallery" => CardKind::Gallery,
            "contact" => CardKind::Contact,
            "features" => CardKind::Features,
            "quote" => CardKind::Quote,
            "footer" => CardKind::Footer,
            _ => CardKind::Unknown(tag),
        }
    }
}

impl From<CardKind> for String {
    fn from(kind: CardKind) -> Self {
        match kind {
            CardKind::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content block within a site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: CardKind,

    /// Render position; absent means 0
    #[serde(
        default,
        deserialize_with = "integral_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    pub fn sort_key(&self) -> i64 {
        self.order.unwrap_or(0)
    }

    /// Parse the content into the typed body for this card's kind.
    ///
    /// Never fails: unknown kinds and content that does not fit the kind's
    /// shape both come back as [`CardBody::Unsupported`].
    pub fn body(&self) -> CardBody {
        let content = Value::Object(self.content.clone().unwrap_or_default());

        let parsed = match &self.kind {
            CardKind::Hero => serde_json::from_value::<HeroContent>(content).map(|mut hero| {
                hero.background = self.hero_background();
                CardBody::Hero(hero)
            }),
            CardKind::About => serde_json::from_value(content).map(CardBody::About),
            CardKind::Services => serde_json::from_value(content).map(CardBody::Services),
            CardKind::Gallery => serde_json::from_value(content).map(CardBody::Gallery),
            CardKind::Contact => serde_json::from_value(content).map(CardBody::Contact),
            CardKind::Text => serde_json::from_value(content).map(CardBody::Text),
            CardKind::Features => serde_json::from_value(content).map(CardBody::Features),
            CardKind::Quote => serde_json::from_value(content).map(CardBody::Quote),
            CardKind::Footer => serde_json::from_value(content).map(CardBody::Footer),
            CardKind::Unknown(tag) => return CardBody::unsupported(tag, None),
        };

        parsed.unwrap_or_else(|e| CardBody::unsupported(self.kind.as_str(), Some(e.to_string())))
    }

    fn hero_background(&self) -> Option<String> {
        self.media
            .as_ref()?
            .get("background")?
            .get("url")?
            .as_str()
            .map(str::to_string)
    }
}

/// JSON Schema counts `1.0` as an integer, so accept any integral number.
fn integral_order<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(order) = number.as_i64() {
        return Ok(Some(order));
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        _ => Err(de::Error::custom(format!(
            "card order must be an integer, got {}",
            number
        ))),
    }
}

/// Typed card content, keyed by card type.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum CardBody {
    Hero(HeroContent),
    About(AboutContent),
    Services(ServicesContent),
    Gallery(GalleryContent),
    Contact(ContactContent),
    Text(TextContent),
    Features(FeaturesContent),
    Quote(QuoteContent),
    Footer(FooterContent),
    /// Placeholder for cards that cannot be rendered
    #[serde(rename_all = "camelCase")]
    Unsupported {
        card_type: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl CardBody {
    fn unsupported(card_type: &str, reason: Option<String>) -> Self {
        CardBody::Unsupported {
            card_type: card_type.to_string(),
            message: format!("Unsupported card type: {}", card_type),
            reason,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, CardBody::Unsupported { .. })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CallToAction {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HeroContent {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub subheadline: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub cta: Option<CallToAction>,
    /// Taken from the card's `media.background.url`
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageRef {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AboutContent {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub cta: Option<CallToAction>,
    #[serde(default)]
    pub media: Option<ImageRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServicesContent {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceItem>,
    #[serde(default)]
    pub cta: Option<CallToAction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GalleryContent {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<GalleryImage>,
    #[serde(default)]
    pub cta: Option<CallToAction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Network name to profile URL
    #[serde(default)]
    pub socials: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormField {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub submit_endpoint: Option<String>,
    #[serde(default)]
    pub submit_label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactContent {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub form: Option<ContactForm>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeaturesContent {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuoteContent {
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FooterLink {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FooterContent {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub links: Vec<FooterLink>,
}
