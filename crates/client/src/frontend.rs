//! Maps terminal commands onto the session.

use domain::Intent;

use crate::api::ShopApi;
use crate::command::{Command, HELP};
use crate::error::Result;
use crate::render;
use crate::session::ShopSession;

/// What the terminal should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to add; bus subscribers already printed the outcome.
    Quiet,
    Text(String),
    Quit,
}

fn missing(what: &str, position: usize) -> Reply {
    Reply::Text(format!("No {what} at position {position}"))
}

/// Applies one command.
///
/// Errors are the storefront's or the backend's; the session stays usable
/// after any of them.
pub async fn apply<A: ShopApi>(session: &mut ShopSession<A>, command: Command) -> Result<Reply> {
    let shop = session.storefront();
    let intent = match command {
        Command::List => {
            let lines: Vec<String> = shop
                .catalog()
                .products()
                .iter()
                .enumerate()
                .map(|(i, product)| render::catalog_line(i, product))
                .collect();
            return Ok(Reply::Text(lines.join("\n")));
        }
        Command::Show(n) => match n.checked_sub(1).and_then(|i| shop.catalog().get_at(i)) {
            Some(product) => Intent::SelectCard(product.id().clone()),
            None => return Ok(missing("product", n)),
        },
        Command::Toggle(n) => match n.checked_sub(1).and_then(|i| shop.catalog().get_at(i)) {
            Some(product) => Intent::ToggleBasket(product.id().clone()),
            None => return Ok(missing("product", n)),
        },
        Command::Remove(n) => match n.checked_sub(1).and_then(|i| shop.basket().items().get(i)) {
            Some(id) => Intent::RemoveFromBasket(id.clone()),
            None => return Ok(missing("basket row", n)),
        },
        Command::Basket => Intent::OpenBasket,
        Command::Checkout => Intent::Checkout,
        Command::Payment(payment) => Intent::Payment(payment),
        Command::Address(address) => Intent::Address(address),
        Command::Email(email) => Intent::Email(email),
        Command::Phone(phone) => Intent::Phone(phone),
        Command::Submit => {
            let receipt = session.submit_order().await?;
            return Ok(Reply::Text(format!("Order id: {}", receipt.id)));
        }
        Command::Help => return Ok(Reply::Text(HELP.to_string())),
        Command::Quit => return Ok(Reply::Quit),
    };

    session.storefront_mut().handle(intent)?;
    Ok(Reply::Quiet)
}
