//! The shop backend as seen by the storefront.

mod http;
mod memory;

pub use http::HttpShopApi;
pub use memory::InMemoryShopApi;

use async_trait::async_trait;
use domain::{OrderReceipt, OrderSubmission, ProductData};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// List envelope used by the backend's collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    pub total: usize,
    pub items: Vec<T>,
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Trait for the backend operations the storefront needs.
#[async_trait]
pub trait ShopApi: Send + Sync {
    /// Fetches the catalog (`GET /product`).
    async fn fetch_products(&self) -> Result<Vec<ProductData>>;

    /// Places an order (`POST /order`).
    async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderReceipt>;
}
