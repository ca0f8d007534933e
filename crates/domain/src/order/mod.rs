//! Checkout order and related types.

mod aggregate;
mod state;
mod submission;
pub mod validation;
mod value_objects;

pub use aggregate::Order;
pub use state::CheckoutState;
pub use submission::{OrderReceipt, OrderSubmission};
pub use value_objects::{FormErrors, OrderField, PaymentMethod};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Order has no items.
    #[error("Order has no items")]
    NoItems,

    /// One of the checkout forms is incomplete.
    #[error("Order form is invalid: {errors}")]
    InvalidForm { errors: FormErrors },

    /// Order is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: CheckoutState,
        action: &'static str,
    },
}
