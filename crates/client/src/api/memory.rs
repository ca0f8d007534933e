//! In-memory shop backend for tests and offline runs.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use common::Price;
use domain::{OrderReceipt, OrderSubmission, ProductData};

use super::ShopApi;
use crate::error::{ClientError, Result};

#[derive(Debug, Default)]
struct InMemoryShopState {
    products: Vec<ProductData>,
    orders: Vec<(String, OrderSubmission)>,
    next_id: u32,
    fail_on_fetch: bool,
    fail_on_submit: bool,
}

/// Backend double that checks orders the way the real one does.
///
/// Orders are rejected with status 400 when they name unknown or priceless
/// products, or when the total does not match the catalog prices.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShopApi {
    state: Arc<RwLock<InMemoryShopState>>,
}

impl InMemoryShopApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend serving the given catalog.
    pub fn with_products(products: Vec<ProductData>) -> Self {
        let api = Self::new();
        api.write().products = products;
        api
    }

    /// Makes catalog requests fail as if the backend were down.
    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.write().fail_on_fetch = fail;
    }

    /// Makes order requests fail as if the backend were down.
    pub fn set_fail_on_submit(&self, fail: bool) {
        self.write().fail_on_submit = fail;
    }

    /// Returns the number of accepted orders.
    pub fn order_count(&self) -> usize {
        self.read().orders.len()
    }

    /// Returns the accepted order with the given id.
    pub fn order(&self, id: &str) -> Option<OrderSubmission> {
        self.read()
            .orders
            .iter()
            .find(|(order_id, _)| order_id == id)
            .map(|(_, order)| order.clone())
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryShopState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryShopState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn bad_request(message: impl Into<String>) -> ClientError {
    ClientError::Status {
        status: 400,
        message: message.into(),
    }
}

impl InMemoryShopState {
    fn check_order(&self, order: &OrderSubmission) -> Result<()> {
        if order.items.is_empty() {
            return Err(bad_request("Order has no items"));
        }

        let mut expected = Price::zero();
        for id in &order.items {
            let product = self
                .products
                .iter()
                .find(|p| &p.id == id)
                .ok_or_else(|| bad_request(format!("Product {id} not found")))?;
            let price = product
                .price
                .ok_or_else(|| bad_request(format!("Product {id} is not for sale")))?;
            expected += price;
        }

        if expected != order.total {
            return Err(bad_request("Order total does not match"));
        }
        Ok(())
    }
}

#[async_trait]
impl ShopApi for InMemoryShopApi {
    async fn fetch_products(&self) -> Result<Vec<ProductData>> {
        let state = self.read();
        if state.fail_on_fetch {
            return Err(ClientError::Unavailable("catalog request failed".to_string()));
        }
        Ok(state.products.clone())
    }

    async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderReceipt> {
        let mut state = self.write();

        if state.fail_on_submit {
            return Err(ClientError::Unavailable("order request failed".to_string()));
        }
        state.check_order(order)?;

        state.next_id += 1;
        let id = format!("ORD-{:04}", state.next_id);
        state.orders.push((id.clone(), order.clone()));

        Ok(OrderReceipt {
            id,
            total: order.total,
        })
    }
}
