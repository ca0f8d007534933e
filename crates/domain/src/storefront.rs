//! Storefront facade tying the catalog, basket and order together.

use common::ProductId;

use crate::basket::Basket;
use crate::catalog::Catalog;
use crate::error::DomainError;
use crate::events::{ShopBus, ShopEvent};
use crate::order::{Order, OrderReceipt, OrderSubmission, PaymentMethod};
use crate::product::ProductData;

/// A user action handed to the state layer by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A catalog card was clicked.
    SelectCard(ProductId),
    /// The preview's buy/remove button was clicked.
    ToggleBasket(ProductId),
    /// The delete button of a basket row was clicked.
    RemoveFromBasket(ProductId),
    /// The basket icon was clicked.
    OpenBasket,
    /// The basket's checkout button was clicked.
    Checkout,
    Payment(PaymentMethod),
    Address(String),
    Email(String),
    Phone(String),
}

/// Entry point for the periphery.
///
/// Owns the bus and the three entities, and is the only place that
/// coordinates them: moving basket contents into the order, clearing the
/// basket after a successful submission, and so on. Views subscribe to
/// [`bus`](Self::bus) and call back in with [`handle`](Self::handle).
#[derive(Debug)]
pub struct Storefront {
    bus: ShopBus,
    catalog: Catalog,
    basket: Basket,
    order: Order,
}

impl Storefront {
    /// Creates an empty storefront with its own bus.
    pub fn new() -> Self {
        Self::with_bus(ShopBus::new())
    }

    /// Creates an empty storefront publishing on an existing bus.
    pub fn with_bus(bus: ShopBus) -> Self {
        Self {
            catalog: Catalog::new(bus.clone()),
            basket: Basket::new(bus.clone()),
            order: Order::new(bus.clone()),
            bus,
        }
    }

    pub fn bus(&self) -> &ShopBus {
        &self.bus
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Replaces the catalog.
    ///
    /// The basket is emptied first so it never refers to products of a
    /// previous load.
    pub fn set_products(&mut self, items: Vec<ProductData>) {
        if !self.basket.is_empty() {
            tracing::info!(items = self.basket.len(), "catalog reload empties the basket");
            self.basket.clear_basket(&mut self.catalog);
            self.sync_order();
        }
        self.catalog.set_products(items);
    }

    /// Publishes a preview request for a product.
    pub fn select_product(&self, id: &ProductId) -> Result<(), DomainError> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| DomainError::UnknownProduct {
                product_id: id.clone(),
            })?;
        self.bus.publish(ShopEvent::CardSelected(product.clone()));
        Ok(())
    }

    /// Puts a product in the basket, refusing priceless ones.
    pub fn add_to_basket(&mut self, id: &ProductId) -> Result<(), DomainError> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| DomainError::UnknownProduct {
                product_id: id.clone(),
            })?;
        if !product.is_purchasable() {
            return Err(DomainError::NotPurchasable {
                product_id: id.clone(),
            });
        }
        self.basket.add_to_basket(&mut self.catalog, id)?;
        self.sync_order();
        Ok(())
    }

    /// Takes a product out of the basket; absent products are ignored.
    pub fn remove_from_basket(&mut self, id: &ProductId) -> bool {
        let removed = self.basket.remove_from_basket(&mut self.catalog, id);
        if removed {
            self.sync_order();
        }
        removed
    }

    /// Adds the product if it is not in the basket, removes it otherwise.
    ///
    /// Returns whether the product is in the basket afterwards.
    #[tracing::instrument(skip(self))]
    pub fn toggle_basket(&mut self, id: &ProductId) -> Result<bool, DomainError> {
        if self.basket.contains(id) {
            self.remove_from_basket(id);
            Ok(false)
        } else {
            self.add_to_basket(id)?;
            Ok(true)
        }
    }

    pub fn clear_basket(&mut self) {
        self.basket.clear_basket(&mut self.catalog);
        self.sync_order();
    }

    /// Keeps a running checkout in line with the basket.
    ///
    /// The order takes the basket's current items and total; emptying the
    /// basket ends the checkout.
    fn sync_order(&mut self) {
        if !self.order.state().in_checkout() {
            return;
        }
        if self.basket.is_empty() {
            tracing::info!("basket emptied during checkout, cancelling it");
            self.order.cancel_checkout();
        } else {
            self.order
                .update_items(self.basket.items().to_vec(), self.basket.total());
        }
    }

    /// Publishes a request to show the basket.
    pub fn open_basket(&self) {
        self.bus.publish(ShopEvent::basket_opened(
            self.basket.snapshot(&self.catalog),
            self.basket.total(),
        ));
    }

    /// Copies the basket into the order and opens the delivery form.
    #[tracing::instrument(skip(self), fields(items = self.basket.len()))]
    pub fn proceed_to_checkout(&mut self) -> Result<(), DomainError> {
        if self.basket.is_empty() {
            return Err(DomainError::EmptyBasket);
        }
        self.order
            .fill_from_basket(self.basket.items().to_vec(), self.basket.total());
        self.bus.publish(ShopEvent::checkout_started(
            self.basket.len(),
            self.basket.total(),
        ));
        Ok(())
    }

    pub fn set_payment(&mut self, payment: PaymentMethod) -> bool {
        self.order.set_payment(payment)
    }

    pub fn set_address(&mut self, address: impl Into<String>) -> bool {
        self.order.set_address(address)
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> bool {
        self.order.set_email(email)
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> bool {
        self.order.set_phone(phone)
    }

    /// Builds the body for `POST /order` from the current order.
    pub fn order_submission(&self) -> Result<OrderSubmission, DomainError> {
        Ok(self.order.submission()?)
    }

    /// Finishes a checkout the backend accepted.
    ///
    /// Publishes `order:completed`, then empties the basket and resets the
    /// order for the next purchase. The backend has the order at this
    /// point, so this never fails.
    #[tracing::instrument(skip(self), fields(order_id = %receipt.id))]
    pub fn complete_order(&mut self, receipt: OrderReceipt) {
        if let Err(e) = self.order.mark_submitted() {
            tracing::warn!(error = %e, "accepted order was not in a submittable state");
        }
        metrics::counter!("orders_submitted").increment(1);
        tracing::info!(total = %receipt.total, "order completed");

        self.bus.publish(ShopEvent::OrderCompleted(receipt));
        self.basket.clear_basket(&mut self.catalog);
        self.order.remove_order_data();
    }

    /// Applies a user action.
    pub fn handle(&mut self, intent: Intent) -> Result<(), DomainError> {
        tracing::debug!(?intent, "handling intent");
        match intent {
            Intent::SelectCard(id) => self.select_product(&id),
            Intent::ToggleBasket(id) => self.toggle_basket(&id).map(|_| ()),
            Intent::RemoveFromBasket(id) => {
                self.remove_from_basket(&id);
                Ok(())
            }
            Intent::OpenBasket => {
                self.open_basket();
                Ok(())
            }
            Intent::Checkout => self.proceed_to_checkout(),
            Intent::Payment(payment) => {
                self.set_payment(payment);
                Ok(())
            }
            Intent::Address(address) => {
                self.set_address(address);
                Ok(())
            }
            Intent::Email(email) => {
                self.set_email(email);
                Ok(())
            }
            Intent::Phone(phone) => {
                self.set_phone(phone);
                Ok(())
            }
        }
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}
