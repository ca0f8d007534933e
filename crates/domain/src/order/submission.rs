//! Shapes exchanged with the backend when placing an order.

use common::{Price, ProductId};
use serde::{Deserialize, Serialize};

use super::PaymentMethod;

/// Body of `POST /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    /// Ids of the ordered products.
    pub items: Vec<ProductId>,

    /// Order total as shown to the user.
    pub total: Price,

    pub payment: PaymentMethod,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// Backend answer to an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Order id assigned by the backend.
    pub id: String,

    /// Amount charged.
    pub total: Price,
}
