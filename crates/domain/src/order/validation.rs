//! Field checks for the two checkout forms.
//!
//! These functions are pure: they report problems and leave publishing to
//! the order.

use std::sync::LazyLock;

use regex::Regex;

use super::{FormErrors, OrderField, PaymentMethod};

pub const PAYMENT_REQUIRED: &str = "select a payment method";
pub const ADDRESS_REQUIRED: &str = "enter an address";
pub const EMAIL_INVALID: &str = "enter a valid email";
pub const PHONE_INVALID: &str = "enter a valid number";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// Optional 8 or +7 prefix, optional (area code), then 7-10 digits with separators.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:8|\+7)[- ]?)?(?:\(?\d{3}\)?[- ]?)?[-\d ]{7,10}$")
        .expect("phone pattern is valid")
});

/// Returns true if `email` looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

/// Returns true if `phone` looks like a Russian phone number.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone.trim())
}

/// Checks the delivery details form.
pub fn delivery_errors(payment: Option<PaymentMethod>, address: &str) -> FormErrors {
    let mut errors = FormErrors::default();
    if payment.is_none() {
        errors.insert(OrderField::Payment, PAYMENT_REQUIRED);
    }
    if address.trim().is_empty() {
        errors.insert(OrderField::Address, ADDRESS_REQUIRED);
    }
    errors
}

/// Checks the contacts form.
pub fn contact_errors(email: &str, phone: &str) -> FormErrors {
    let mut errors = FormErrors::default();
    if !is_valid_email(email) {
        errors.insert(OrderField::Email, EMAIL_INVALID);
    }
    if !is_valid_phone(phone) {
        errors.insert(OrderField::Phone, PHONE_INVALID);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_email_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@mail.example.ru"));
        assert!(is_valid_email("  padded@example.org  "));
    }

    #[test]
    fn rejects_malformed_email_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spa ce@example.com"));
    }

    #[test]
    fn accepts_russian_phone_formats() {
        assert!(is_valid_phone("+7 912 345 6789"));
        assert!(is_valid_phone("89123456789"));
        assert!(is_valid_phone("8 (912) 345-67-89"));
        assert!(is_valid_phone("+7(912)3456789"));
        assert!(is_valid_phone("3456789"));
    }

    #[test]
    fn rejects_bad_phone_numbers() {
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me"));
        assert!(!is_valid_phone("+1 912 345 6789 000 111"));
    }

    #[test]
    fn delivery_errors_name_each_failing_field() {
        let errors = delivery_errors(None, "");
        assert_eq!(errors.get(OrderField::Payment), Some(PAYMENT_REQUIRED));
        assert_eq!(errors.get(OrderField::Address), Some(ADDRESS_REQUIRED));
        assert_eq!(errors.len(), 2);

        let errors = delivery_errors(Some(PaymentMethod::Online), "   ");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![OrderField::Address]);

        assert!(delivery_errors(Some(PaymentMethod::OnDelivery), "Moscow").is_empty());
    }

    #[test]
    fn contact_errors_name_each_failing_field() {
        let errors = contact_errors("not-an-email", "+7 912 345 6789");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![OrderField::Email]);

        let errors = contact_errors("", "");
        assert_eq!(errors.len(), 2);

        assert!(contact_errors("a@b.com", "+7 912 345 6789").is_empty());
    }
}
