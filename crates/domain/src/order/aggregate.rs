//! Checkout order.

use common::{Price, ProductId};

use crate::events::{ShopBus, ShopEvent};

use super::validation::{contact_errors, delivery_errors};
use super::{CheckoutState, FormErrors, OrderError, OrderSubmission, PaymentMethod};

/// The order being checked out.
///
/// Holds the basket contents copied at checkout plus the delivery and
/// contact details typed by the user. Every field setter re-runs the
/// validation of its form and publishes the result; validation only
/// reports, it never rejects the value.
#[derive(Debug)]
pub struct Order {
    items: Vec<ProductId>,
    total: Option<Price>,
    payment: Option<PaymentMethod>,
    address: String,
    email: String,
    phone: String,
    valid: bool,
    errors: FormErrors,
    state: CheckoutState,
    bus: ShopBus,
}

// Query methods
impl Order {
    /// Creates an empty order publishing on `bus`.
    pub fn new(bus: ShopBus) -> Self {
        Self {
            items: Vec::new(),
            total: None,
            payment: None,
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            valid: false,
            errors: FormErrors::default(),
            state: CheckoutState::default(),
            bus,
        }
    }

    /// Returns the ordered product ids.
    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    pub fn total(&self) -> Option<Price> {
        self.total
    }

    pub fn payment(&self) -> Option<PaymentMethod> {
        self.payment
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the outcome of the last validation run.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the errors found by the last validation run.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

// Command methods
impl Order {
    /// Starts a checkout with the basket's contents.
    ///
    /// Details typed during an earlier, unfinished checkout are kept and the
    /// state reflects them.
    #[tracing::instrument(skip(self, items), fields(items = items.len()))]
    pub fn fill_from_basket(&mut self, items: Vec<ProductId>, total: Option<Price>) {
        self.items = items;
        self.total = total;
        self.valid = false;
        self.errors = FormErrors::default();
        self.state = CheckoutState::DeliveryPending;
        let contacts_started = self.contacts_started();
        self.advance(contacts_started);
    }

    /// Replaces the ordered items during checkout, keeping the details.
    pub fn update_items(&mut self, items: Vec<ProductId>, total: Option<Price>) {
        self.items = items;
        self.total = total;
    }

    /// Leaves the checkout without submitting.
    ///
    /// Items are dropped; typed details are kept for the next checkout.
    #[tracing::instrument(skip(self), fields(state = %self.state))]
    pub fn cancel_checkout(&mut self) {
        self.items.clear();
        self.total = None;
        self.valid = false;
        self.errors = FormErrors::default();
        self.state = CheckoutState::Uninitialized;
    }

    /// Sets the payment method and validates the delivery details.
    pub fn set_payment(&mut self, payment: PaymentMethod) -> bool {
        self.payment = Some(payment);
        self.validate_delivery_details()
    }

    /// Sets the delivery address and validates the delivery details.
    pub fn set_address(&mut self, address: impl Into<String>) -> bool {
        self.address = address.into();
        self.validate_delivery_details()
    }

    /// Sets the email and validates the contacts.
    pub fn set_email(&mut self, email: impl Into<String>) -> bool {
        self.email = email.into();
        self.validate_contacts()
    }

    /// Sets the phone number and validates the contacts.
    pub fn set_phone(&mut self, phone: impl Into<String>) -> bool {
        self.phone = phone.into();
        self.validate_contacts()
    }

    /// Checks payment and address, then publishes `deliveryDetailsErrors:change`.
    ///
    /// Returns true if both are filled in.
    #[tracing::instrument(skip(self), fields(state = %self.state))]
    pub fn validate_delivery_details(&mut self) -> bool {
        let errors = delivery_errors(self.payment, &self.address);
        let contacts_started = self.contacts_started();
        self.advance(contacts_started);
        self.record(errors, ShopEvent::DeliveryDetailsErrorsChanged)
    }

    /// Checks email and phone, then publishes `contactsErrors:change`.
    ///
    /// Returns true if both match their patterns.
    #[tracing::instrument(skip(self), fields(state = %self.state))]
    pub fn validate_contacts(&mut self) -> bool {
        let errors = contact_errors(&self.email, &self.phone);
        self.advance(true);
        self.record(errors, ShopEvent::ContactsErrorsChanged)
    }

    fn contacts_started(&self) -> bool {
        !self.email.is_empty() || !self.phone.is_empty()
    }

    /// Derives the checkout state from both forms, whatever order they were
    /// filled in. Outside a checkout the state is left alone.
    fn advance(&mut self, contacts_started: bool) {
        if !self.state.in_checkout() {
            return;
        }
        self.state = if !delivery_errors(self.payment, &self.address).is_empty() {
            CheckoutState::DeliveryPending
        } else if !contacts_started {
            CheckoutState::DeliveryValid
        } else if contact_errors(&self.email, &self.phone).is_empty() {
            CheckoutState::ContactsValid
        } else {
            CheckoutState::ContactsPending
        };
    }

    fn record(&mut self, errors: FormErrors, event: fn(FormErrors) -> ShopEvent) -> bool {
        self.valid = errors.is_empty();
        if !self.valid {
            metrics::counter!("order_validation_failures").increment(1);
        }
        tracing::debug!(valid = self.valid, errors = %errors, state = %self.state, "order validated");

        self.errors = errors.clone();
        self.bus.publish(event(errors));
        self.valid
    }

    /// Builds the body for `POST /order`.
    ///
    /// Checks both forms and the checkout state without publishing
    /// anything. Succeeds exactly when [`mark_submitted`](Self::mark_submitted)
    /// would.
    pub fn submission(&self) -> Result<OrderSubmission, OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::NoItems);
        }

        let mut errors = delivery_errors(self.payment, &self.address);
        errors.extend(contact_errors(&self.email, &self.phone));

        let payment = match self.payment {
            Some(payment) if errors.is_empty() => payment,
            _ => return Err(OrderError::InvalidForm { errors }),
        };

        if !self.state.can_submit() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.state,
                action: "submit",
            });
        }

        Ok(OrderSubmission {
            items: self.items.clone(),
            total: self.total.unwrap_or_default(),
            payment,
            address: self.address.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        })
    }

    /// Records that the backend accepted the order.
    pub fn mark_submitted(&mut self) -> Result<(), OrderError> {
        if !self.state.can_submit() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.state,
                action: "submit",
            });
        }
        self.state = CheckoutState::Submitted;
        Ok(())
    }

    /// Resets every field to its initial value.
    #[tracing::instrument(skip(self), fields(state = %self.state))]
    pub fn remove_order_data(&mut self) {
        self.items.clear();
        self.total = None;
        self.payment = None;
        self.address.clear();
        self.email.clear();
        self.phone.clear();
        self.valid = false;
        self.errors = FormErrors::default();
        self.state = CheckoutState::Uninitialized;
    }
}
