//! Catalog API response types.
//!
//! Field names follow the API's JSON. List endpoints return a lighter shape
//! than detail endpoints (a flat `category_name` and one `featured_image`
//! instead of the nested category and the full gallery), so the detail-only
//! fields default and both shapes decode into the same type.

use chrono::{DateTime, Utc};
use livestock_core::{CategoryId, EggListingId, LivestockId, Price};
use serde::{Deserialize, Serialize};

/// An uploaded photo or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MediaAsset {
    /// Absolute URL of the file.
    pub file: Option<String>,
    pub media_type: String,
    pub is_featured: bool,
}

impl MediaAsset {
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.media_type.is_empty() || self.media_type == "image"
    }

    /// URL of the file when it is a displayable image.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.file
            .as_deref()
            .filter(|url| !url.is_empty() && self.is_image())
    }
}

/// A livestock category (Goats, Sheep, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Unsold listings in this category.
    #[serde(default)]
    pub livestock_count: u32,
    #[serde(default)]
    pub preview_image: Option<MediaAsset>,
}

impl Category {
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.preview_image.as_ref().and_then(MediaAsset::image_url)
    }
}

/// A single animal (or lot) offered for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Livestock {
    pub id: LivestockId,
    pub name: String,
    #[serde(default)]
    pub breed: String,
    pub price: Price,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub is_sold: bool,
    /// Category name, as sent by list endpoints.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Full category, as sent by the detail endpoint.
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub featured_image: Option<MediaAsset>,
    #[serde(default)]
    pub media: Vec<MediaAsset>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub health_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Livestock {
    /// Category name from whichever shape the API sent.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category_name
            .as_deref()
            .or_else(|| self.category.as_ref().map(|c| c.name.as_str()))
            .unwrap_or_default()
    }

    /// Main photo: the featured image, else the first featured gallery
    /// image, else the first gallery image.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.featured_image
            .as_ref()
            .and_then(MediaAsset::image_url)
            .or_else(|| {
                self.media
                    .iter()
                    .filter(|m| m.is_featured)
                    .find_map(MediaAsset::image_url)
            })
            .or_else(|| self.media.iter().find_map(MediaAsset::image_url))
    }

    /// Every gallery image URL, in API order.
    #[must_use]
    pub fn gallery(&self) -> Vec<&str> {
        self.media.iter().filter_map(MediaAsset::image_url).collect()
    }
}

/// Primary photo of an egg listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EggImage {
    pub url: Option<String>,
}

/// Hatching or table eggs, sold by the crate or tray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EggListing {
    pub id: EggListingId,
    pub name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub breed: String,
    pub price: Price,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub quantity_available: u32,
    /// Freshness label computed by the API ("fresh", "good", ...).
    #[serde(default)]
    pub freshness_status: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub primary_image: Option<EggImage>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl EggListing {
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.primary_image
            .as_ref()
            .and_then(|image| image.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

fn default_currency() -> String {
    Price::DEFAULT_CURRENCY.to_string()
}

const fn default_true() -> bool {
    true
}

/// Answer from the assistant's chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// Listings the backend used as context for the answer.
    #[serde(default)]
    pub context_count: u32,
}

/// One page of a paginated listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// List endpoints answer with a bare array when pagination is off and with a
/// page when it is on.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ListOrPage<T> {
    List(Vec<T>),
    Page(Page<T>),
}

impl<T> ListOrPage<T> {
    pub(super) fn into_items(self) -> Vec<T> {
        match self {
            Self::List(items) => items,
            Self::Page(page) => page.results,
        }
    }

    /// A bare array is a single, complete page.
    pub(super) fn into_page(self) -> Page<T> {
        match self {
            Self::List(items) => Page {
                count: items.len() as u64,
                next: None,
                previous: None,
                results: items,
            },
            Self::Page(page) => page,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const LIST_ITEM_JSON: &str = r#"{
        "id": "3f6d7a52-1c1e-4b8e-9a55-0f1d2e3c4b5a",
        "name": "Premium Boer Goat Buck",
        "breed": "Boer",
        "price": "450000.00",
        "currency": "NGN",
        "location": "Ibadan, Oyo",
        "featured_image": {"id": null, "file": "https://cdn.farm.test/boer.jpg", "media_type": "image", "is_featured": true, "aspect_ratio": 1.0},
        "category_name": "Goats",
        "media_count": 3,
        "is_sold": false
    }"#;

    const DETAIL_JSON: &str = r#"{
        "id": "3f6d7a52-1c1e-4b8e-9a55-0f1d2e3c4b5a",
        "name": "Premium Boer Goat Buck",
        "breed": "Boer",
        "category": {"id": "8b0a4c1d-2e3f-4a5b-8c7d-9e0f1a2b3c4d", "name": "Goats", "slug": "goats", "description": "", "icon": null},
        "age": "2 years",
        "weight": "80kg",
        "gender": "male",
        "price": "450000.00",
        "currency": "NGN",
        "location": "Ibadan, Oyo",
        "is_sold": false,
        "description": "Proven sire.",
        "health_status": "Healthy, dewormed",
        "vaccination_history": ["PPR"],
        "media": [
            {"id": "1", "file": "https://cdn.farm.test/walk.mp4", "media_type": "video", "is_featured": false, "aspect_ratio": 1.7},
            {"id": "2", "file": "https://cdn.farm.test/side.jpg", "media_type": "image", "is_featured": false, "aspect_ratio": 1.0}
        ],
        "tags": [],
        "created_at": "2026-03-01T10:00:00Z",
        "updated_at": "2026-03-02T10:00:00Z"
    }"#;

    #[test]
    fn test_list_item_shape() {
        let listing: Livestock = serde_json::from_str(LIST_ITEM_JSON).unwrap();
        assert_eq!(listing.price.amount(), Decimal::new(45_000_000, 2));
        assert_eq!(listing.category_label(), "Goats");
        assert_eq!(listing.image_url(), Some("https://cdn.farm.test/boer.jpg"));
        assert!(listing.created_at.is_none());
        assert_eq!(listing.description, "");
    }

    #[test]
    fn test_detail_shape() {
        let listing: Livestock = serde_json::from_str(DETAIL_JSON).unwrap();
        assert_eq!(listing.category_label(), "Goats");
        assert_eq!(listing.gender.as_deref(), Some("male"));
        // The video is skipped when picking the main photo
        assert_eq!(listing.image_url(), Some("https://cdn.farm.test/side.jpg"));
        assert_eq!(listing.gallery(), vec!["https://cdn.farm.test/side.jpg"]);
        assert!(listing.created_at.is_some());
    }

    #[test]
    fn test_currency_defaults_to_naira() {
        let json = r#"{"id": "3f6d7a52-1c1e-4b8e-9a55-0f1d2e3c4b5a", "name": "Ewe", "price": "90000"}"#;
        let listing: Livestock = serde_json::from_str(json).unwrap();
        assert_eq!(listing.currency, "NGN");
        assert_eq!(listing.category_label(), "");
        assert!(listing.image_url().is_none());
    }

    #[test]
    fn test_page_of_listings() {
        let json = format!(
            r#"{{"count": 31, "next": "https://api.farm.test/api/livestock/?page=2", "previous": null, "results": [{LIST_ITEM_JSON}]}}"#
        );
        let page: Page<Livestock> = serde_json::from_str(&json).unwrap();
        assert_eq!(page.count, 31);
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_categories_with_previews() {
        let json = r#"[
            {"id": "8b0a4c1d-2e3f-4a5b-8c7d-9e0f1a2b3c4d", "name": "Goats", "slug": "goats", "description": "Meat and dairy", "icon": null,
             "livestock_count": 12, "preview_image": {"id": null, "file": "https://cdn.farm.test/goats.png", "media_type": "image", "is_featured": true, "aspect_ratio": 1.0}},
            {"id": "9c1b5d2e-3f4a-4b6c-9d8e-0f1a2b3c4d5e", "name": "Sheep", "slug": "sheep", "description": "", "icon": null,
             "livestock_count": 0, "preview_image": null}
        ]"#;
        let categories = serde_json::from_str::<ListOrPage<Category>>(json)
            .unwrap()
            .into_items();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].livestock_count, 12);
        assert_eq!(categories[0].image_url(), Some("https://cdn.farm.test/goats.png"));
        assert!(categories[1].image_url().is_none());
    }

    #[test]
    fn test_bare_list_becomes_single_page() {
        let json = r#"[{"id": "1b2c3d4e-5f6a-4b7c-8d9e-0a1b2c3d4e5f", "name": "Noiler eggs", "price": "4500.00",
                        "quantity_available": 30, "primary_image": {"url": "https://cdn.farm.test/eggs.jpg", "aspect_ratio": 1.0}}]"#;
        let page = serde_json::from_str::<ListOrPage<EggListing>>(json)
            .unwrap()
            .into_page();
        assert_eq!(page.count, 1);
        assert!(!page.has_next());
        assert!(page.results[0].is_available);
        assert_eq!(page.results[0].image_url(), Some("https://cdn.farm.test/eggs.jpg"));
    }

    #[test]
    fn test_chat_reply() {
        let json = r#"{"response": "We have 3 Boer bucks in Oyo.", "context_count": 3}"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.response, "We have 3 Boer bucks in Oyo.");
        assert_eq!(reply.context_count, 3);

        let reply: ChatReply = serde_json::from_str(r#"{"response": "Hello!"}"#).unwrap();
        assert_eq!(reply.context_count, 0);
    }
}
