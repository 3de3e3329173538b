//! Product catalog client.
//!
//! The catalog is a public, unauthenticated JSON API (dummyjson-compatible):
//!
//! - `GET products/categories`
//! - `GET products/category/{slug}`
//! - `GET products/{id}`
//! - `GET products?limit=&skip=`
//! - `GET products/search?q=`
//!
//! Categories, single products and product pages are cached in memory via
//! `moka`; search results are always fetched fresh.

mod cache;

use std::sync::Arc;

use cartwheel_core::{Category, Product, ProductId, ProductPage};
use moka::future::Cache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::StorefrontConfig;

use cache::CacheValue;

/// Errors that can occur when reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned {0}")]
    Status(StatusCode),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    http: reqwest::Client,
    base_url: Url,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                http,
                base_url: config.catalog_url.clone(),
                cache,
            }),
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(path)?;
        let response = self.inner.http.get(url).query(query).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }
        Ok(response.json().await?)
    }

    /// All product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.fetch("products/categories", &[]).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    #[instrument(skip(self))]
    pub async fn products_of_category(&self, slug: &str) -> Result<Vec<Product>, CatalogError> {
        let cache_key = format!("category:{slug}");

        if let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category products");
            return Ok(page.products);
        }

        let path = format!("products/category/{}", urlencoding::encode(slug));
        let page: ProductPage = self.fetch(&path, &[]).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(page.clone()))
            .await;

        Ok(page.products)
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown ids, or an error if the
    /// request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self
            .fetch(&format!("products/{id}"), &[])
            .await
            .map_err(|e| match e {
                CatalogError::NotFound(_) => CatalogError::NotFound(format!("product {id}")),
                other => other,
            })?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// A page of the full product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, limit: u32, skip: u32) -> Result<ProductPage, CatalogError> {
        let cache_key = format!("products:{limit}:{skip}");

        if let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(page);
        }

        let page: ProductPage = self
            .fetch(
                "products",
                &[("limit", limit.to_string()), ("skip", skip.to_string())],
            )
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(page.clone()))
            .await;

        Ok(page)
    }

    /// Full-text product search. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog request fails.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        let page: ProductPage = self
            .fetch("products/search", &[("q", term.to_string())])
            .await?;
        Ok(page.products)
    }
}
