//! Catalog browsing: the query string contract and the floating filter bar.

pub mod filter_bar;
pub mod query;

pub use filter_bar::FilterBar;
pub use query::{CATALOG_PATH, CatalogQuery, CategoryPill, FilterChip, SortOption, keys};
