//! Checkout state machine.

use serde::{Deserialize, Serialize};

/// Where the order is in the two-stage checkout.
///
/// State transitions:
/// ```text
/// Uninitialized ──► DeliveryPending ◄──► DeliveryValid
///       ▲                                     │
///       │                                     ▼
///       │            ContactsPending ◄──► ContactsValid ──► Submitted
///       │                                                       │
///       └───────────────────────────────────────────────────────┘
/// ```
/// Moves between the pending and valid states are driven by validation
/// results, not by explicit calls. Resetting the order returns to
/// `Uninitialized` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// No checkout in progress.
    #[default]
    Uninitialized,

    /// Delivery form open, payment or address missing.
    DeliveryPending,

    /// Delivery details complete; the contacts form may open.
    DeliveryValid,

    /// Contacts form open, email or phone invalid.
    ContactsPending,

    /// Contacts complete; the order may be submitted.
    ContactsValid,

    /// The backend accepted the order.
    Submitted,
}

impl CheckoutState {
    /// Returns true while the user is filling in the forms.
    pub fn in_checkout(&self) -> bool {
        !matches!(self, CheckoutState::Uninitialized | CheckoutState::Submitted)
    }

    /// Returns true if the delivery form is the active one.
    pub fn is_delivery_stage(&self) -> bool {
        matches!(
            self,
            CheckoutState::DeliveryPending | CheckoutState::DeliveryValid
        )
    }

    /// Returns true if the contacts form may be shown.
    pub fn can_open_contacts(&self) -> bool {
        matches!(
            self,
            CheckoutState::DeliveryValid
                | CheckoutState::ContactsPending
                | CheckoutState::ContactsValid
        )
    }

    /// Returns true if the order can be submitted in this state.
    pub fn can_submit(&self) -> bool {
        matches!(self, CheckoutState::ContactsValid)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Uninitialized => "Uninitialized",
            CheckoutState::DeliveryPending => "DeliveryPending",
            CheckoutState::DeliveryValid => "DeliveryValid",
            CheckoutState::ContactsPending => "ContactsPending",
            CheckoutState::ContactsValid => "ContactsValid",
            CheckoutState::Submitted => "Submitted",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
