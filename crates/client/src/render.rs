//! Plain-text views for bus events.

use common::Price;
use domain::{FormErrors, Product, ShopEvent};

/// Shown instead of a price for products that are not for sale.
pub const PRICELESS: &str = "Priceless";

pub fn price_label(price: Option<Price>) -> String {
    match price {
        Some(price) => price.to_string(),
        None => PRICELESS.to_string(),
    }
}

/// One catalog row, numbered from 1.
pub fn catalog_line(position: usize, product: &Product) -> String {
    let marker = if product.in_basket() { "*" } else { " " };
    format!(
        "{marker}{:>3}. [{}] {} | {}",
        position + 1,
        product.category(),
        product.title(),
        price_label(product.price()),
    )
}

fn basket_lines(products: &[Product], total: Option<Price>) -> String {
    if products.is_empty() {
        return "Basket is empty".to_string();
    }
    let mut out = String::from("Basket:");
    for (i, product) in products.iter().enumerate() {
        out.push_str(&format!(
            "\n  {}. {} | {}",
            i + 1,
            product.title(),
            price_label(product.price())
        ));
    }
    out.push_str(&format!("\nTotal: {}", price_label(total)));
    out
}

fn form_line(form: &str, errors: &FormErrors) -> String {
    if errors.is_empty() {
        format!("{form}: ready")
    } else {
        format!("{form}: {errors}")
    }
}

/// Renders an event the way the terminal shows it.
///
/// `cdn_url` prefixes product image paths in previews.
pub fn render_event(event: &ShopEvent, cdn_url: &str) -> String {
    match event {
        ShopEvent::ItemsChanged(data) => {
            let mut out = format!("Catalog ({} products):", data.products.len());
            for (i, product) in data.products.iter().enumerate() {
                out.push('\n');
                out.push_str(&catalog_line(i, product));
            }
            out
        }
        ShopEvent::BasketChanged(data) => format!("Basket: {} item(s)", data.products.len()),
        ShopEvent::CardSelected(product) => {
            let action = match (product.is_purchasable(), product.in_basket()) {
                (false, _) => "not for sale",
                (true, true) => "toggle to remove from basket",
                (true, false) => "toggle to buy",
            };
            format!(
                "{} [{}]\n{}\nImage: {}{}\nPrice: {} ({action})",
                product.title(),
                product.category(),
                product.description(),
                cdn_url,
                product.image(),
                price_label(product.price()),
            )
        }
        ShopEvent::BasketOpened(data) => basket_lines(&data.products, data.total),
        ShopEvent::CheckoutStarted(data) => format!(
            "Checkout: {} item(s), {}. Choose payment and enter an address.",
            data.item_count,
            price_label(data.total)
        ),
        ShopEvent::DeliveryDetailsErrorsChanged(errors) => form_line("Delivery", errors),
        ShopEvent::ContactsErrorsChanged(errors) => form_line("Contacts", errors),
        ShopEvent::OrderCompleted(receipt) => {
            format!("Order placed. Charged {}", receipt.total)
        }
    }
}
