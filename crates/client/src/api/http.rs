//! `reqwest` implementation of the shop backend.

use std::time::Instant;

use async_trait::async_trait;
use domain::{OrderReceipt, OrderSubmission, ProductData};
use serde::de::DeserializeOwned;

use super::{ApiErrorBody, ApiListResponse, ShopApi};
use crate::error::{ClientError, Result};

/// Talks to the shop backend over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpShopApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpShopApi {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decodes a success body, or turns the backend's `{ "error": .. }` body into
/// [`ClientError::Status`].
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    metrics::counter!("backend_request_failures").increment(1);
    let message = match response.json::<ApiErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown status").to_string(),
    };
    tracing::warn!(status = status.as_u16(), %message, "backend rejected request");

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ShopApi for HttpShopApi {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_products(&self) -> Result<Vec<ProductData>> {
        let started = Instant::now();
        let response = self.client.get(self.url("/product")).send().await?;
        metrics::histogram!("backend_request_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        let list: ApiListResponse<ProductData> = handle_response(response).await?;
        tracing::debug!(total = list.total, received = list.items.len(), "products fetched");
        Ok(list.items)
    }

    #[tracing::instrument(skip(self, order), fields(items = order.items.len(), total = %order.total))]
    async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderReceipt> {
        let started = Instant::now();
        let response = self
            .client
            .post(self.url("/order"))
            .json(order)
            .send()
            .await?;
        metrics::histogram!("backend_request_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        handle_response(response).await
    }
}
