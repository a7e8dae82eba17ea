//! Home page and its lazily loaded sections.
//!
//! The page itself renders without touching the catalog API. The category
//! showcase and the latest listings each arrive as an HTMX fragment, so a
//! slow or failing API only affects its own block.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use livestock_core::stores::FilterState;
use tracing::instrument;

use super::views::{CategoryView, ListingView, Section};
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

/// Listings shown in the "fresh arrivals" strip.
const LATEST_LIMIT: usize = 6;

/// Categories shown in the showcase.
const SHOWCASE_LIMIT: usize = 8;

/// A customer quote.
#[derive(Debug, Clone, Copy)]
pub struct Testimonial {
    pub quote: &'static str,
    pub name: &'static str,
    pub farm: &'static str,
}

/// Quotes shown on the home page.
pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "Found two registered Boer does within a week. The listings had everything \
                we needed to decide before we drove out.",
        name: "Amaka O.",
        farm: "Green Pastures Farm, Oyo",
    },
    Testimonial {
        quote: "We sell most of our spring lambs here now. Buyers show up knowing exactly \
                what they want.",
        name: "Tunde A.",
        farm: "Savannah Rams, Kaduna",
    },
    Testimonial {
        quote: "The hatching eggs arrived well packed and our first batch had a great \
                hatch rate.",
        name: "Ngozi E.",
        farm: "Backyard flock, Ogun",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub testimonials: &'static [Testimonial],
}

/// Category showcase fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/category_showcase.html")]
pub struct CategoryShowcaseTemplate {
    pub categories: Section<CategoryView>,
}

/// Latest listings fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/latest_listings.html")]
pub struct LatestListingsTemplate {
    pub listings: Section<ListingView>,
}

/// Display the home page.
#[instrument(skip(page))]
pub async fn home(page: PageContext) -> HomeTemplate {
    HomeTemplate {
        page,
        testimonials: TESTIMONIALS,
    }
}

/// Category showcase (HTMX fragment).
#[instrument(skip(state))]
pub async fn category_showcase(State(state): State<AppState>) -> CategoryShowcaseTemplate {
    let result = state
        .catalog()
        .list_categories()
        .await
        .map(|mut categories| {
            categories.truncate(SHOWCASE_LIMIT);
            categories
        });

    CategoryShowcaseTemplate {
        categories: Section::from_result(result, "category showcase"),
    }
}

/// Newest listings (HTMX fragment).
#[instrument(skip(state))]
pub async fn latest_listings(State(state): State<AppState>) -> LatestListingsTemplate {
    let filters = FilterState {
        is_sold: Some(false),
        ..FilterState::default()
    };
    let result = state
        .catalog()
        .list_livestock(&filters, 1)
        .await
        .map(|page| page.results.into_iter().take(LATEST_LIMIT).collect::<Vec<_>>());

    LatestListingsTemplate {
        listings: Section::from_result(result, "latest listings"),
    }
}
