//! Domain error types.

use common::ProductId;
use thiserror::Error;

use crate::basket::BasketError;
use crate::order::OrderError;

/// Errors that can occur during storefront operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An error occurred in the basket.
    #[error("Basket error: {0}")]
    Basket(#[from] BasketError),

    /// An error occurred in the order.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// The product is not part of the current catalog.
    #[error("Product not in catalog: {product_id}")]
    UnknownProduct { product_id: ProductId },

    /// The product has no price and cannot be bought.
    #[error("Product cannot be bought: {product_id}")]
    NotPurchasable { product_id: ProductId },

    /// Checkout was requested with nothing in the basket.
    #[error("Basket is empty")]
    EmptyBasket,
}
