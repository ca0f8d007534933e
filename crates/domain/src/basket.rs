//! Shopping basket.

use common::{Price, ProductId};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::events::{ShopBus, ShopEvent};
use crate::product::Product;

/// Errors that can occur during basket operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasketError {
    /// The product is not part of the current catalog.
    #[error("Product not in catalog: {product_id}")]
    UnknownProduct { product_id: ProductId },
}

/// Products the user intends to buy.
///
/// The basket stores product ids in the order they were added, each at most
/// once, and derives its total from the catalog. Every mutation publishes
/// `basket:changed`.
#[derive(Debug)]
pub struct Basket {
    items: Vec<ProductId>,
    total: Option<Price>,
    bus: ShopBus,
}

impl Basket {
    /// Creates an empty basket publishing on `bus`.
    pub fn new(bus: ShopBus) -> Self {
        Self {
            items: Vec::new(),
            total: None,
            bus,
        }
    }

    /// Puts a product in the basket and marks it as such in the catalog.
    ///
    /// Adding a product that is already in the basket changes nothing.
    #[tracing::instrument(skip(self, catalog))]
    pub fn add_to_basket(
        &mut self,
        catalog: &mut Catalog,
        id: &ProductId,
    ) -> Result<(), BasketError> {
        if catalog.set_in_basket(id, true).is_none() {
            return Err(BasketError::UnknownProduct {
                product_id: id.clone(),
            });
        }

        if self.contains(id) {
            tracing::debug!(product_id = %id, "product already in basket");
            return Ok(());
        }

        self.items.push(id.clone());
        metrics::counter!("basket_items_added").increment(1);
        self.recompute(catalog);
        self.announce(catalog);
        Ok(())
    }

    /// Takes a product out of the basket.
    ///
    /// Removing a product that is not in the basket is a no-op; returns
    /// whether anything was removed.
    #[tracing::instrument(skip(self, catalog))]
    pub fn remove_from_basket(&mut self, catalog: &mut Catalog, id: &ProductId) -> bool {
        catalog.set_in_basket(id, false);

        let before = self.items.len();
        self.items.retain(|item| item != id);
        if self.items.len() == before {
            return false;
        }

        metrics::counter!("basket_items_removed").increment(1);
        self.recompute(catalog);
        self.announce(catalog);
        true
    }

    /// Empties the basket.
    #[tracing::instrument(skip(self, catalog), fields(items = self.items.len()))]
    pub fn clear_basket(&mut self, catalog: &mut Catalog) {
        for id in self.items.drain(..) {
            catalog.set_in_basket(&id, false);
        }
        self.recompute(catalog);
        self.announce(catalog);
    }

    /// Returns true if the product is in the basket.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.contains(id)
    }

    /// Returns the ids in the basket, in the order they were added.
    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the sum of the contained products' prices.
    ///
    /// An empty basket has no total. Priceless products count as zero.
    pub fn total(&self) -> Option<Price> {
        self.total
    }

    /// Resolves the basket's ids against the catalog.
    pub fn products<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        self.items.iter().filter_map(|id| catalog.get(id)).collect()
    }

    pub(crate) fn snapshot(&self, catalog: &Catalog) -> Vec<Product> {
        self.products(catalog).into_iter().cloned().collect()
    }

    fn recompute(&mut self, catalog: &Catalog) {
        self.total = if self.items.is_empty() {
            None
        } else {
            Some(
                self.products(catalog)
                    .iter()
                    .map(|p| p.price().unwrap_or_default())
                    .sum(),
            )
        };
    }

    fn announce(&self, catalog: &Catalog) {
        self.bus
            .publish(ShopEvent::basket_changed(self.snapshot(catalog), self.total));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::events::ShopEventKind;
    use crate::product::{Category, ProductData};

    fn item(id: &str, price: Option<u64>) -> ProductData {
        let builder = Product::builder(id, format!("Product {id}"), Category::HardSkill);
        match price {
            Some(p) => builder.price(p).build(),
            None => builder.build(),
        }
    }

    fn setup() -> (ShopBus, Catalog, Basket) {
        let bus = ShopBus::new();
        let mut catalog = Catalog::new(bus.clone());
        catalog.set_products(vec![
            item("a", Some(100)),
            item("b", Some(250)),
            item("free", None),
        ]);
        let basket = Basket::new(bus.clone());
        (bus, catalog, basket)
    }

    fn flagged_total(catalog: &Catalog) -> u64 {
        catalog
            .products()
            .iter()
            .filter(|p| p.in_basket())
            .map(|p| p.price().map(|p| p.synapses()).unwrap_or(0))
            .sum()
    }

    #[test]
    fn total_follows_additions_and_removals() {
        let (_bus, mut catalog, mut basket) = setup();

        basket.add_to_basket(&mut catalog, &"a".into()).unwrap();
        basket.add_to_basket(&mut catalog, &"b".into()).unwrap();
        assert_eq!(basket.total(), Some(Price::new(350)));

        assert!(basket.remove_from_basket(&mut catalog, &"a".into()));
        assert_eq!(basket.total(), Some(Price::new(250)));
        assert!(!catalog.get(&"a".into()).unwrap().in_basket());
        assert!(catalog.get(&"b".into()).unwrap().in_basket());
    }

    #[test]
    fn total_matches_flagged_products_for_any_sequence() {
        let (_bus, mut catalog, mut basket) = setup();
        let ops: [(&str, bool); 8] = [
            ("a", true),
            ("free", true),
            ("b", true),
            ("a", false),
            ("a", true),
            ("b", false),
            ("free", false),
            ("b", false),
        ];

        for (id, add) in ops {
            let id = ProductId::from(id);
            if add {
                basket.add_to_basket(&mut catalog, &id).unwrap();
            } else {
                basket.remove_from_basket(&mut catalog, &id);
            }
            let expected = flagged_total(&catalog);
            let actual = basket.total().map(|t| t.synapses()).unwrap_or(0);
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn priceless_product_counts_as_zero() {
        let (_bus, mut catalog, mut basket) = setup();

        basket.add_to_basket(&mut catalog, &"free".into()).unwrap();

        assert_eq!(basket.total(), Some(Price::zero()));
        assert_eq!(basket.len(), 1);
    }

    #[test]
    fn empty_basket_has_no_total() {
        let (_bus, mut catalog, mut basket) = setup();
        assert_eq!(basket.total(), None);

        basket.add_to_basket(&mut catalog, &"a".into()).unwrap();
        basket.remove_from_basket(&mut catalog, &"a".into());

        assert_eq!(basket.total(), None);
    }

    #[test]
    fn adding_twice_keeps_a_single_entry() {
        let (_bus, mut catalog, mut basket) = setup();

        basket.add_to_basket(&mut catalog, &"a".into()).unwrap();
        basket.add_to_basket(&mut catalog, &"a".into()).unwrap();

        assert_eq!(basket.items(), &[ProductId::from("a")]);
        assert_eq!(basket.total(), Some(Price::new(100)));
    }

    #[test]
    fn unknown_product_is_rejected() {
        let (_bus, mut catalog, mut basket) = setup();

        let err = basket
            .add_to_basket(&mut catalog, &"ghost".into())
            .unwrap_err();

        assert_eq!(
            err,
            BasketError::UnknownProduct {
                product_id: "ghost".into()
            }
        );
        assert!(basket.is_empty());
    }

    #[test]
    fn removing_absent_product_is_a_no_op() {
        let (_bus, mut catalog, mut basket) = setup();
        basket.add_to_basket(&mut catalog, &"a".into()).unwrap();

        assert!(!basket.remove_from_basket(&mut catalog, &"b".into()));
        assert!(!basket.remove_from_basket(&mut catalog, &"ghost".into()));

        assert_eq!(basket.len(), 1);
        assert_eq!(basket.total(), Some(Price::new(100)));
    }

    #[test]
    fn clear_basket_is_idempotent() {
        let (_bus, mut catalog, mut basket) = setup();
        basket.add_to_basket(&mut catalog, &"a".into()).unwrap();
        basket.add_to_basket(&mut catalog, &"b".into()).unwrap();

        basket.clear_basket(&mut catalog);
        let once = (basket.items().to_vec(), basket.total());
        basket.clear_basket(&mut catalog);
        let twice = (basket.items().to_vec(), basket.total());

        assert_eq!(once, twice);
        assert_eq!(once, (vec![], None));
        assert!(catalog.products().iter().all(|p| !p.in_basket()));
    }

    #[test]
    fn mutations_announce_basket_contents() {
        let (bus, mut catalog, mut basket) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = Rc::clone(&seen);
        bus.subscribe(ShopEventKind::BasketChanged, move |event| {
            if let ShopEvent::BasketChanged(data) = event {
                let ids: Vec<String> =
                    data.products.iter().map(|p| p.id().to_string()).collect();
                s.borrow_mut()
                    .push((ids, data.total.map(|t| t.synapses())));
            }
        });

        basket.add_to_basket(&mut catalog, &"a".into()).unwrap();
        basket.add_to_basket(&mut catalog, &"b".into()).unwrap();
        basket.remove_from_basket(&mut catalog, &"a".into());
        basket.remove_from_basket(&mut catalog, &"a".into());
        basket.clear_basket(&mut catalog);

        assert_eq!(
            *seen.borrow(),
            vec![
                (vec!["a".to_string()], Some(100)),
                (vec!["a".to_string(), "b".to_string()], Some(350)),
                (vec!["b".to_string()], Some(250)),
                (vec![], None),
            ]
        );
    }

    #[test]
    fn announced_products_carry_membership_flag() {
        let (bus, mut catalog, mut basket) = setup();
        let flags = Rc::new(RefCell::new(Vec::new()));

        let f = Rc::clone(&flags);
        bus.subscribe(ShopEventKind::BasketChanged, move |event| {
            if let ShopEvent::BasketChanged(data) = event {
                f.borrow_mut()
                    .extend(data.products.iter().map(|p| p.in_basket()));
            }
        });

        basket.add_to_basket(&mut catalog, &"b".into()).unwrap();

        assert_eq!(*flags.borrow(), vec![true]);
    }
}
