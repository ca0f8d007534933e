//! Events the state layer publishes on the bus.

use common::Price;
use event_bus::{BusEvent, EventBus};
use serde::{Deserialize, Serialize};

use crate::order::{FormErrors, OrderReceipt};
use crate::product::Product;

/// The bus every storefront component publishes on.
pub type ShopBus = EventBus<ShopEvent>;

/// Everything the state layer announces to its listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ShopEvent {
    /// The catalog was replaced.
    #[serde(rename = "items:changed")]
    ItemsChanged(ItemsChangedData),

    /// Products were added to or removed from the basket.
    #[serde(rename = "basket:changed")]
    BasketChanged(BasketData),

    /// A product preview was requested.
    #[serde(rename = "catalog:selectCard")]
    CardSelected(Product),

    /// The basket view was requested.
    #[serde(rename = "basket:open")]
    BasketOpened(BasketData),

    /// The user proceeded from the basket to the delivery form.
    #[serde(rename = "checkout:started")]
    CheckoutStarted(CheckoutStartedData),

    /// Delivery details were validated.
    #[serde(rename = "deliveryDetailsErrors:change")]
    DeliveryDetailsErrorsChanged(FormErrors),

    /// Contact details were validated.
    #[serde(rename = "contactsErrors:change")]
    ContactsErrorsChanged(FormErrors),

    /// The backend accepted the order.
    #[serde(rename = "order:completed")]
    OrderCompleted(OrderReceipt),
}

/// The kinds of [`ShopEvent`], used as subscription keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopEventKind {
    ItemsChanged,
    BasketChanged,
    CardSelected,
    BasketOpened,
    CheckoutStarted,
    DeliveryDetailsErrorsChanged,
    ContactsErrorsChanged,
    OrderCompleted,
}

impl ShopEventKind {
    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShopEventKind::ItemsChanged => "items:changed",
            ShopEventKind::BasketChanged => "basket:changed",
            ShopEventKind::CardSelected => "catalog:selectCard",
            ShopEventKind::BasketOpened => "basket:open",
            ShopEventKind::CheckoutStarted => "checkout:started",
            ShopEventKind::DeliveryDetailsErrorsChanged => "deliveryDetailsErrors:change",
            ShopEventKind::ContactsErrorsChanged => "contactsErrors:change",
            ShopEventKind::OrderCompleted => "order:completed",
        }
    }
}

impl std::fmt::Display for ShopEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BusEvent for ShopEvent {
    type Kind = ShopEventKind;

    fn kind(&self) -> ShopEventKind {
        match self {
            ShopEvent::ItemsChanged(_) => ShopEventKind::ItemsChanged,
            ShopEvent::BasketChanged(_) => ShopEventKind::BasketChanged,
            ShopEvent::CardSelected(_) => ShopEventKind::CardSelected,
            ShopEvent::BasketOpened(_) => ShopEventKind::BasketOpened,
            ShopEvent::CheckoutStarted(_) => ShopEventKind::CheckoutStarted,
            ShopEvent::DeliveryDetailsErrorsChanged(_) => {
                ShopEventKind::DeliveryDetailsErrorsChanged
            }
            ShopEvent::ContactsErrorsChanged(_) => ShopEventKind::ContactsErrorsChanged,
            ShopEvent::OrderCompleted(_) => ShopEventKind::OrderCompleted,
        }
    }

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Data for the `items:changed` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsChangedData {
    /// The new catalog contents, in load order.
    pub products: Vec<Product>,
}

/// Snapshot of the basket carried by `basket:changed` and `basket:open`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketData {
    /// Products in the basket, in the order they were added.
    pub products: Vec<Product>,

    /// Sum of their prices; `None` when the basket is empty.
    pub total: Option<Price>,
}

/// Data for the `checkout:started` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutStartedData {
    /// Number of products being ordered.
    pub item_count: usize,

    /// Order total carried over from the basket.
    pub total: Option<Price>,
}

// Convenience constructors for events
impl ShopEvent {
    /// Creates an `items:changed` event.
    pub fn items_changed(products: Vec<Product>) -> Self {
        ShopEvent::ItemsChanged(ItemsChangedData { products })
    }

    /// Creates a `basket:changed` event.
    pub fn basket_changed(products: Vec<Product>, total: Option<Price>) -> Self {
        ShopEvent::BasketChanged(BasketData { products, total })
    }

    /// Creates a `basket:open` event.
    pub fn basket_opened(products: Vec<Product>, total: Option<Price>) -> Self {
        ShopEvent::BasketOpened(BasketData { products, total })
    }

    /// Creates a `checkout:started` event.
    pub fn checkout_started(item_count: usize, total: Option<Price>) -> Self {
        ShopEvent::CheckoutStarted(CheckoutStartedData { item_count, total })
    }
}
