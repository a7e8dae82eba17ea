//! Catalog API client implementation.

use std::sync::Arc;

use livestock_core::LivestockId;
use livestock_core::stores::FilterState;
use moka::future::Cache;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;

use super::ApiError;
use super::cache::CacheValue;
use super::types::{Category, ChatReply, EggListing, ListOrPage, Livestock, Page};
use crate::config::CatalogApiConfig;

const CATEGORIES_PATH: &str = "categories/with-previews/";
const LIVESTOCK_PATH: &str = "livestock/";
const LIVESTOCK_SEARCH_PATH: &str = "livestock/search-ai/";
const EGGS_PATH: &str = "eggs/";
const CHAT_PATH: &str = "chat/send/";

/// Client for the livestock catalog API.
///
/// Cheap to clone. Successful responses are cached for the configured TTL;
/// failures are never cached and never retried.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                token: config.token.clone(),
                cache,
            }),
        }
    }

    /// Build an endpoint URL below the API root.
    fn endpoint<K, V>(&self, path: &str, params: &[(K, V)]) -> Result<Url, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.inner.base_url.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// GET a URL and decode its JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        let request = self.inner.client.get(url.as_str());
        self.send_json(request, url).await
    }

    /// POST a JSON body to a URL and decode the JSON answer.
    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let request = self.inner.client.post(url.as_str()).json(body);
        self.send_json(request, url).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        request = request.header(ACCEPT, "application/json");
        if let Some(token) = &self.inner.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.path().to_string()));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog API response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List every category with its listing count and a preview photo.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint::<&str, &str>(CATEGORIES_PATH, &[])?;
        let cache_key = url.to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories = self
            .get_json::<ListOrPage<Category>>(&url)
            .await?
            .into_items();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    // =========================================================================
    // Livestock
    // =========================================================================

    /// List livestock matching `filters`, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, filters), fields(ordering = filters.ordering.as_str()))]
    pub async fn list_livestock(
        &self,
        filters: &FilterState,
        page: u32,
    ) -> Result<Page<Livestock>, ApiError> {
        let url = self.endpoint(LIVESTOCK_PATH, &listing_params(filters, page))?;
        let cache_key = url.to_string();

        // Free-text searches are too varied to be worth caching
        let cacheable = filters.search.is_none();

        if cacheable
            && let Some(CacheValue::LivestockPage(listings)) =
                self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for livestock page");
            return Ok(listings);
        }

        let listings = self
            .get_json::<ListOrPage<Livestock>>(&url)
            .await?
            .into_page();

        if cacheable {
            self.inner
                .cache
                .insert(cache_key, CacheValue::LivestockPage(listings.clone()))
                .await;
        }

        Ok(listings)
    }

    /// Fetch a single listing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the listing does not exist, or another
    /// error if the API request fails.
    #[instrument(skip(self), fields(livestock_id = %id))]
    pub async fn get_livestock(&self, id: LivestockId) -> Result<Livestock, ApiError> {
        let url = self.endpoint::<&str, &str>(&format!("{LIVESTOCK_PATH}{id}/"), &[])?;
        let cache_key = url.to_string();

        if let Some(CacheValue::Livestock(listing)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for livestock");
            return Ok(*listing);
        }

        let listing: Livestock = self.get_json(&url).await.map_err(|e| match e {
            ApiError::NotFound(_) => ApiError::NotFound(format!("Livestock not found: {id}")),
            other => other,
        })?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Livestock(Box::new(listing.clone())))
            .await;

        Ok(listing)
    }

    /// Natural-language livestock search ("pregnant goats near Ibadan").
    ///
    /// Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_livestock(&self, query: &str) -> Result<Vec<Livestock>, ApiError> {
        let url = self.endpoint::<&str, &str>(LIVESTOCK_SEARCH_PATH, &[])?;
        let results = self
            .post_json::<ListOrPage<Livestock>>(&url, &json!({ "query": query }))
            .await?;
        Ok(results.into_items())
    }

    // =========================================================================
    // Chat
    // =========================================================================

    /// Ask the marketplace assistant about one visitor message.
    ///
    /// Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, message))]
    pub async fn send_chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        let url = self.endpoint::<&str, &str>(CHAT_PATH, &[])?;
        let reply: ChatReply = self.post_json(&url, &json!({ "message": message })).await?;
        debug!(context_count = reply.context_count, "Assistant replied");
        Ok(reply)
    }

    // =========================================================================
    // Eggs
    // =========================================================================

    /// List egg batches, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_eggs(&self, page: u32) -> Result<Page<EggListing>, ApiError> {
        let url = self.endpoint(EGGS_PATH, &page_param(page))?;
        let cache_key = url.to_string();

        if let Some(CacheValue::Eggs(eggs)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for eggs");
            return Ok(eggs);
        }

        let eggs = self
            .get_json::<ListOrPage<EggListing>>(&url)
            .await?
            .into_page();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Eggs(eggs.clone()))
            .await;

        Ok(eggs)
    }
}

/// Query parameters for a livestock page request.
fn listing_params(filters: &FilterState, page: u32) -> Vec<(&'static str, String)> {
    let mut params = filters.api_params();
    params.extend(page_param(page));
    params
}

/// Page 1 is the API default and is left implicit.
fn page_param(page: u32) -> Vec<(&'static str, String)> {
    if page > 1 {
        vec![("page", page.to_string())]
    } else {
        Vec::new()
    }
}
