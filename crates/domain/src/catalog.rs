//! Product catalog.

use std::collections::HashMap;

use common::ProductId;

use crate::events::{ShopBus, ShopEvent};
use crate::product::{Product, ProductData};

/// The list of products currently offered by the shop.
///
/// The catalog owns every product of the current load cycle. Other
/// components refer to products by id and look them up here, so a reload
/// never leaves them holding stale copies.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    bus: ShopBus,
}

impl Catalog {
    /// Creates an empty catalog publishing on `bus`.
    pub fn new(bus: ShopBus) -> Self {
        Self {
            products: Vec::new(),
            index: HashMap::new(),
            bus,
        }
    }

    /// Replaces the catalog contents and publishes `items:changed`.
    ///
    /// Products keep the input order and start outside the basket. When the
    /// input repeats an id, the first occurrence wins.
    #[tracing::instrument(skip(self, items), fields(count = items.len()))]
    pub fn set_products(&mut self, items: Vec<ProductData>) {
        let mut products = Vec::with_capacity(items.len());
        let mut index = HashMap::with_capacity(items.len());

        for data in items {
            if index.contains_key(&data.id) {
                tracing::warn!(product_id = %data.id, "duplicate product id in catalog load, skipping");
                continue;
            }
            index.insert(data.id.clone(), products.len());
            products.push(Product::from(data));
        }

        self.products = products;
        self.index = index;

        metrics::counter!("catalog_loads").increment(1);
        tracing::debug!(products = self.products.len(), "catalog replaced");

        self.bus.publish(ShopEvent::items_changed(self.products.clone()));
    }

    /// Returns all products in load order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// Returns the product at a zero-based position in the catalog.
    pub fn get_at(&self, position: usize) -> Option<&Product> {
        self.products.get(position)
    }

    /// Returns true if the catalog holds a product with this id.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Flips the membership flag of a product.
    ///
    /// This is the only way to change the flag; basket operations go
    /// through it.
    pub(crate) fn set_in_basket(&mut self, id: &ProductId, in_basket: bool) -> Option<&Product> {
        let &i = self.index.get(id)?;
        let product = &mut self.products[i];
        product.set_in_basket(in_basket);
        Some(product)
    }
}
