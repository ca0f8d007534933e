//! Value objects for the checkout order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the customer pays for the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid by card while placing the order.
    #[serde(rename = "online")]
    Online,

    /// Paid when the order is handed over.
    #[serde(rename = "on delivery")]
    OnDelivery,
}

impl PaymentMethod {
    /// Returns the wire name of the payment method.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "online",
            PaymentMethod::OnDelivery => "on delivery",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    /// Accepts the wire names plus the `card` and `cash` shorthands.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" | "card" => Ok(PaymentMethod::Online),
            "on delivery" | "cash" => Ok(PaymentMethod::OnDelivery),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// A user-editable field of the checkout forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Payment,
    Address,
    Email,
    Phone,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Payment => "payment",
            OrderField::Address => "address",
            OrderField::Email => "email",
            OrderField::Phone => "phone",
        }
    }

    /// Returns true if the field belongs to the delivery details form.
    pub fn is_delivery_detail(&self) -> bool {
        matches!(self, OrderField::Payment | OrderField::Address)
    }
}

impl std::fmt::Display for OrderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validation messages keyed by the field they concern.
///
/// Only currently invalid fields have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<OrderField, String>);

impl FormErrors {
    /// Records a message for a field, replacing any previous one.
    pub fn insert(&mut self, field: OrderField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Returns the message for a field, if it is invalid.
    pub fn get(&self, field: OrderField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: OrderField) -> bool {
        self.0.contains_key(&field)
    }

    /// Returns the invalid fields in a stable order.
    pub fn fields(&self) -> impl Iterator<Item = OrderField> + '_ {
        self.0.keys().copied()
    }

    /// Returns `(field, message)` pairs in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (OrderField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Merges another set of errors into this one.
    pub fn extend(&mut self, other: FormErrors) {
        self.0.extend(other.0);
    }
}

/// Joins the messages with `" and "` and capitalizes the first letter,
/// e.g. `Select a payment method and enter an address`.
impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self.0.values().map(String::as_str).collect::<Vec<_>>().join(" and ");
        let mut chars = joined.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}
