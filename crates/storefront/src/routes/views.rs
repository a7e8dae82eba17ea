//! View models shared by the page templates.

use livestock_core::catalog::{CatalogQuery, keys};
use livestock_core::stores::ChatMessage;
use livestock_core::{EggListingId, LivestockId};

use crate::api::{ApiError, Category, EggListing, Livestock, Page};

// =============================================================================
// Section
// =============================================================================

const PAGE_PAST_END_MESSAGE: &str = "There are no more results. Go back to the first page.";

/// A data-driven block of a page: loading, failed or loaded.
///
/// Templates check `is_loading()`, then `error()`, then `is_empty()` and
/// finally iterate `items()`.
#[derive(Debug, Clone)]
pub enum Section<T> {
    /// Rendered as a spinner; the block fetches itself via HTMX.
    Loading,
    /// Rendered as an inline message with a retry control.
    Failed(String),
    Ready(Vec<T>),
}

impl<T> Section<T> {
    /// Build from an API result, logging failures under `what`.
    pub fn from_result<U>(result: Result<Vec<U>, ApiError>, what: &str) -> Self
    where
        T: for<'a> From<&'a U>,
    {
        match result {
            Ok(items) => Self::Ready(items.iter().map(T::from).collect()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load {what}");
                Self::Failed(e.user_message().to_string())
            }
        }
    }

    /// A paginated list that failed to load. The API answers 404 for a page
    /// past the end, which is not a missing listing.
    pub fn page_failed(error: &ApiError, what: &str) -> Self {
        tracing::error!(error = %error, "Failed to load {what}");
        let message = match error {
            ApiError::NotFound(_) => PAGE_PAST_END_MESSAGE,
            other => other.user_message(),
        };
        Self::Failed(message.to_string())
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            Self::Loading | Self::Ready(_) => None,
        }
    }

    /// Loaded and empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self {
            Self::Ready(items) => items.is_empty(),
            Self::Loading | Self::Failed(_) => false,
        }
    }

    /// Loaded items; empty while loading or after a failure.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Ready(items) => items,
            Self::Loading | Self::Failed(_) => &[],
        }
    }
}

// =============================================================================
// Listings
// =============================================================================

/// Livestock display data for templates.
#[derive(Debug, Clone)]
pub struct ListingView {
    pub id: LivestockId,
    pub name: String,
    pub category: String,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub weight: Option<String>,
    pub health_status: Option<String>,
    pub price: String,
    pub is_sold: bool,
    pub description: String,
    pub image: Option<String>,
    /// Extra photos after the main one (detail responses only).
    pub gallery: Vec<String>,
    pub location: Option<String>,
    pub listed_on: Option<String>,
    pub detail_href: String,
    pub modal_href: String,
}

/// Longest card description before it is cut.
const EXCERPT_CHARS: usize = 140;

impl ListingView {
    /// Description shortened for cards.
    #[must_use]
    pub fn excerpt(&self) -> String {
        excerpt(&self.description, EXCERPT_CHARS)
    }

    /// Alt text for the listing photo.
    #[must_use]
    pub fn alt(&self) -> String {
        match &self.breed {
            Some(breed) => format!("{} ({breed})", self.name),
            None => self.name.clone(),
        }
    }
}

impl From<&Livestock> for ListingView {
    fn from(listing: &Livestock) -> Self {
        let image = listing.image_url().map(str::to_owned);
        let gallery = listing
            .gallery()
            .into_iter()
            .filter(|url| Some(*url) != image.as_deref())
            .map(str::to_owned)
            .collect();

        Self {
            id: listing.id,
            name: listing.name.clone(),
            category: listing.category_label().to_owned(),
            breed: non_empty(&listing.breed),
            gender: listing.gender.as_deref().map(capitalize),
            age: listing.age.as_deref().and_then(non_empty),
            weight: listing.weight.as_deref().and_then(non_empty),
            health_status: listing.health_status.as_deref().and_then(non_empty),
            price: listing.price.format(&listing.currency),
            is_sold: listing.is_sold,
            description: listing.description.clone(),
            image,
            gallery,
            location: non_empty(&listing.location),
            listed_on: listing
                .created_at
                .map(|at| at.format("%b %-d, %Y").to_string()),
            detail_href: format!("/livestock/{}", listing.id),
            modal_href: format!("/livestock/{}/modal", listing.id),
        }
    }
}

/// Category display data for templates.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub listing_count: u32,
    pub image: Option<String>,
    /// Catalog filtered to this category.
    pub href: String,
}

impl CategoryView {
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.listing_count {
            1 => "1 listing".to_string(),
            n => format!("{n} listings"),
        }
    }
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            listing_count: category.livestock_count,
            image: category.image_url().map(str::to_owned),
            href: CatalogQuery::default()
                .update_params(keys::CATEGORY, Some(category.name.as_str()))
                .href(),
        }
    }
}

/// Egg batch display data for templates.
#[derive(Debug, Clone)]
pub struct EggView {
    pub id: EggListingId,
    pub name: String,
    pub category: Option<String>,
    pub breed: Option<String>,
    pub price: String,
    pub quantity: u32,
    pub freshness: Option<String>,
    pub location: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub is_featured: bool,
    pub is_available: bool,
}

impl From<&EggListing> for EggView {
    fn from(eggs: &EggListing) -> Self {
        Self {
            id: eggs.id,
            name: eggs.name.clone(),
            category: eggs.category_name.as_deref().and_then(non_empty),
            breed: non_empty(&eggs.breed),
            price: eggs.price.format(&eggs.currency),
            quantity: eggs.quantity_available,
            freshness: eggs.freshness_status.as_deref().map(capitalize),
            location: non_empty(&eggs.location),
            description: excerpt(&eggs.description, EXCERPT_CHARS),
            image: eggs.image_url().map(str::to_owned),
            is_featured: eggs.is_featured,
            is_available: eggs.is_available && eggs.quantity_available > 0,
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Previous/next links for a paginated listing.
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub page: u32,
    pub total: u64,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl Pagination {
    /// Build links from an API page, using `href_for(page)` for each target.
    pub fn new<T>(page: &Page<T>, current: u32, href_for: impl Fn(u32) -> String) -> Self {
        Self {
            page: current,
            total: page.count,
            prev_href: (page.has_previous() && current > 1).then(|| href_for(current - 1)),
            next_href: current
                .checked_add(1)
                .filter(|_| page.has_next())
                .map(&href_for),
        }
    }

    #[must_use]
    pub const fn is_needed(&self) -> bool {
        self.prev_href.is_some() || self.next_href.is_some()
    }
}

// =============================================================================
// Chat
// =============================================================================

/// One chat bubble.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub id: String,
    pub from_user: bool,
    pub content: String,
    pub time: String,
}

impl From<&ChatMessage> for MessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.clone(),
            from_user: message.role == livestock_core::stores::ChatRole::User,
            content: message.content.clone(),
            time: message.timestamp.format("%H:%M").to_string(),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_owned())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let trimmed = cut.rfind(' ').map_or(cut.as_str(), |i| cut.get(..i).unwrap_or(&cut));
    format!("{}…", trimmed.trim_end())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use livestock_core::Price;
    use rust_decimal::Decimal;

    use super::*;
    use crate::api::MediaAsset;

    const LISTING_ID: &str = "3f6d7a52-1c1e-4b8e-9a55-0f1d2e3c4b5a";

    fn listing() -> Livestock {
        Livestock {
            id: LISTING_ID.parse().unwrap(),
            name: "Nubian doe".to_string(),
            breed: "Nubian".to_string(),
            price: Price::new(Decimal::new(120_000, 2)),
            currency: "NGN".to_string(),
            location: "  ".to_string(),
            is_sold: false,
            category_name: Some("Goats".to_string()),
            category: None,
            featured_image: None,
            media: vec![
                MediaAsset {
                    file: Some("https://cdn.farm.test/front.jpg".to_string()),
                    media_type: "image".to_string(),
                    is_featured: true,
                },
                MediaAsset {
                    file: Some("https://cdn.farm.test/side.jpg".to_string()),
                    media_type: "image".to_string(),
                    is_featured: false,
                },
            ],
            age: Some("2 years".to_string()),
            weight: Some(String::new()),
            gender: Some("female".to_string()),
            description: String::new(),
            health_status: None,
            created_at: Some(Utc.with_ymd_and_hms(2026, 4, 9, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_listing_view() {
        let view = ListingView::from(&listing());
        assert_eq!(view.price, "₦1,200.00");
        assert_eq!(view.gender.as_deref(), Some("Female"));
        assert_eq!(view.detail_href, format!("/livestock/{LISTING_ID}"));
        assert_eq!(view.modal_href, format!("/livestock/{LISTING_ID}/modal"));
        assert_eq!(view.listed_on.as_deref(), Some("Apr 9, 2026"));
        assert_eq!(view.alt(), "Nubian doe (Nubian)");
        assert_eq!(view.image.as_deref(), Some("https://cdn.farm.test/front.jpg"));
        assert_eq!(view.gallery, vec!["https://cdn.farm.test/side.jpg".to_string()]);
        // Blank strings from the API are treated as missing
        assert!(view.location.is_none());
        assert!(view.weight.is_none());
    }

    #[test]
    fn test_category_links_to_filtered_catalog() {
        let category = Category {
            id: "8b0a4c1d-2e3f-4a5b-8c7d-9e0f1a2b3c4d".parse().unwrap(),
            name: "Dairy Goats".to_string(),
            slug: "dairy-goats".to_string(),
            description: String::new(),
            livestock_count: 1,
            preview_image: None,
        };
        let view = CategoryView::from(&category);
        assert_eq!(view.href, "/livestock?category=Dairy+Goats");
        assert_eq!(view.count_label(), "1 listing");
        assert!(view.image.is_none());
    }

    #[test]
    fn test_sold_out_eggs_are_unavailable() {
        let eggs = EggListing {
            id: "1b2c3d4e-5f6a-4b7c-8d9e-0a1b2c3d4e5f".parse().unwrap(),
            name: "Noiler hatching eggs".to_string(),
            category_name: Some("Poultry".to_string()),
            breed: String::new(),
            price: Price::new(Decimal::new(4_500, 0)),
            currency: "NGN".to_string(),
            quantity_available: 0,
            freshness_status: Some("fresh".to_string()),
            is_featured: false,
            primary_image: None,
            location: "Abeokuta".to_string(),
            description: String::new(),
            is_available: true,
            created_at: None,
        };
        let view = EggView::from(&eggs);
        assert!(!view.is_available);
        assert!(view.breed.is_none());
        assert_eq!(view.freshness.as_deref(), Some("Fresh"));
        assert_eq!(view.price, "₦4,500.00");
    }

    #[test]
    fn test_section_states() {
        let loading: Section<ListingView> = Section::Loading;
        assert!(loading.is_loading());
        assert!(loading.items().is_empty());
        assert!(!loading.is_empty());

        let failed: Section<ListingView> = Section::from_result::<Livestock>(
            Err(ApiError::Status {
                status: 500,
                body: String::new(),
            }),
            "listings",
        );
        assert!(failed.error().is_some());
        assert!(!failed.is_empty());

        let empty: Section<ListingView> = Section::from_result::<Livestock>(Ok(vec![]), "listings");
        assert!(empty.is_empty());

        let ready: Section<ListingView> =
            Section::from_result(Ok(vec![listing()]), "listings");
        assert_eq!(ready.items().len(), 1);
        assert!(ready.error().is_none());
    }

    #[test]
    fn test_pagination_links() {
        let page: Page<Livestock> = Page {
            count: 40,
            next: Some("n".to_string()),
            previous: Some("p".to_string()),
            results: vec![],
        };
        let links = Pagination::new(&page, 2, |p| format!("/eggs?page={p}"));
        assert_eq!(links.prev_href.as_deref(), Some("/eggs?page=1"));
        assert_eq!(links.next_href.as_deref(), Some("/eggs?page=3"));
        assert!(links.is_needed());

        let single = Pagination::new(&Page::<Livestock>::default(), 1, |p| p.to_string());
        assert!(!single.is_needed());
    }

    #[test]
    fn test_pagination_stops_at_last_page_number() {
        let page: Page<Livestock> = Page {
            count: 40,
            next: Some("n".to_string()),
            previous: Some("p".to_string()),
            results: vec![],
        };
        let links = Pagination::new(&page, u32::MAX, |p| format!("/livestock?page={p}"));
        assert!(links.next_href.is_none());
        assert_eq!(
            links.prev_href,
            Some(format!("/livestock?page={}", u32::MAX - 1))
        );
    }

    #[test]
    fn test_page_past_the_end_is_not_a_missing_listing() {
        let section: Section<ListingView> =
            Section::page_failed(&ApiError::NotFound("/livestock/".into()), "listings");
        assert_eq!(section.error(), Some(PAGE_PAST_END_MESSAGE));

        let section: Section<ListingView> = Section::page_failed(&ApiError::RateLimited(2), "listings");
        assert_eq!(section.error(), Some(ApiError::RateLimited(2).user_message()));
    }

    #[test]
    fn test_excerpt_cuts_on_word_boundary() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("one two three four", 9), "one two…");
    }
}
