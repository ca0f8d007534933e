//! Storefront bound to a backend.

use domain::{OrderReceipt, Storefront};

use crate::api::ShopApi;
use crate::error::Result;

/// Owns a [`Storefront`] and performs the backend round trips for it.
///
/// Backend answers are applied to the storefront only after they arrive, so
/// a failed request leaves the basket and the order exactly as they were.
#[derive(Debug)]
pub struct ShopSession<A> {
    api: A,
    storefront: Storefront,
}

impl<A: ShopApi> ShopSession<A> {
    pub fn new(api: A) -> Self {
        Self::with_storefront(api, Storefront::new())
    }

    /// Binds an existing storefront, e.g. one views already subscribed to.
    pub fn with_storefront(api: A, storefront: Storefront) -> Self {
        Self { api, storefront }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    pub fn storefront_mut(&mut self) -> &mut Storefront {
        &mut self.storefront
    }

    /// Fetches the catalog and hands it to the storefront.
    ///
    /// Returns the number of products loaded.
    #[tracing::instrument(skip(self))]
    pub async fn load_catalog(&mut self) -> Result<usize> {
        let products = self.api.fetch_products().await?;
        let count = products.len();
        self.storefront.set_products(products);
        tracing::info!(count, "catalog loaded");
        Ok(count)
    }

    /// Sends the current order and completes the checkout on success.
    #[tracing::instrument(skip(self))]
    pub async fn submit_order(&mut self) -> Result<OrderReceipt> {
        let submission = self.storefront.order_submission()?;

        let receipt = match self.api.submit_order(&submission).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(error = %e, "order submission failed");
                return Err(e);
            }
        };

        self.storefront.complete_order(receipt.clone());
        Ok(receipt)
    }
}
