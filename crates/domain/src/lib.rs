//! Storefront state layer.
//!
//! This crate provides the entities of the shop and keeps listeners in sync
//! through an event bus:
//! - [`Catalog`] owning the products of the current load
//! - [`Basket`] with its derived total
//! - [`Order`] with the two-stage checkout validation state machine
//! - [`ShopEvent`], the closed set of notifications published on the bus
//! - [`Storefront`], a facade translating user [`Intent`]s into mutations

pub mod basket;
pub mod catalog;
pub mod error;
pub mod events;
pub mod order;
pub mod product;
pub mod storefront;

pub use basket::{Basket, BasketError};
pub use catalog::Catalog;
pub use common::{Price, ProductId};
pub use event_bus::{BusEvent, SubscriptionId};
pub use error::DomainError;
pub use events::{
    BasketData, CheckoutStartedData, ItemsChangedData, ShopBus, ShopEvent, ShopEventKind,
};
pub use order::{
    CheckoutState, FormErrors, Order, OrderError, OrderField, OrderReceipt, OrderSubmission,
    PaymentMethod,
};
pub use product::{Category, Product, ProductBuilder, ProductData};
pub use storefront::{Intent, Storefront};
