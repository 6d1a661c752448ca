//! REST client for the commerce API.
//!
//! Talks to the two endpoints the cart consumes:
//!
//! - `GET /stock/{productId}` -> [`StockLevel`]
//! - `GET /products/{productId}` -> [`Product`]

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use shoebox_core::{Product, ProductId, StockLevel};

use crate::api::{ApiError, CommerceApi};
use crate::config::CartConfig;

/// HTTP client for the commerce API.
#[derive(Debug, Clone)]
pub struct RestCommerceClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RestCommerceClient {
    /// Create a new commerce API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &CartConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.api_base_url),
        })
    }

    /// Build the URL for a resource under the base URL.
    fn endpoint(&self, collection: &str, id: ProductId) -> Result<Url, ApiError> {
        self.base_url
            .join(&format!("{collection}/{id}"))
            .map_err(|e| ApiError::Parse(format!("invalid endpoint URL: {e}")))
    }

    /// Execute a GET request and decode the JSON body.
    async fn fetch<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CommerceApi for RestCommerceClient {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_stock(&self, id: ProductId) -> Result<StockLevel, ApiError> {
        let url = self.endpoint("stock", id)?;
        self.fetch(url, &format!("stock for product {id}")).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let url = self.endpoint("products", id)?;
        self.fetch(url, &format!("product {id}")).await
    }
}

/// Ensure the base URL ends with a slash so `Url::join` keeps the final path
/// segment instead of replacing it.
fn normalize_base_url(base: &Url) -> Url {
    if base.path().ends_with('/') {
        return base.clone();
    }
    let mut normalized = base.clone();
    normalized.set_path(&format!("{}/", base.path()));
    normalized
}
