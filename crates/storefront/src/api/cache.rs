//! Cache types for catalog API responses.

use super::types::{Category, EggListing, Livestock, Page};

/// Cached value types, keyed by the full request URL.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Livestock(Box<Livestock>),
    LivestockPage(Page<Livestock>),
    Eggs(Page<EggListing>),
}
