//! Product entity and its wire representation.

use common::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// Product category, a closed set defined by the shop backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "софт-скил")]
    SoftSkill,
    #[serde(rename = "хард-скил")]
    HardSkill,
    #[serde(rename = "дополнительное")]
    Additional,
    #[serde(rename = "другое")]
    Other,
    #[serde(rename = "кнопка")]
    Button,
}

impl Category {
    /// Returns the label as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SoftSkill => "софт-скил",
            Category::HardSkill => "хард-скил",
            Category::Additional => "дополнительное",
            Category::Other => "другое",
            Category::Button => "кнопка",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A product as returned by `GET /product`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    pub id: ProductId,
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// `None` means the product cannot be bought.
    pub price: Option<Price>,
}

/// A product held by the catalog.
///
/// Products are owned by the [`Catalog`](crate::Catalog); the basket and the
/// order refer to them by id. The membership flag is only changed by basket
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    title: String,
    category: Category,
    description: String,
    image: String,
    price: Option<Price>,
    in_basket: bool,
}

impl Product {
    /// Starts building a product with the required fields.
    pub fn builder(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        category: Category,
    ) -> ProductBuilder {
        ProductBuilder {
            data: ProductData {
                id: id.into(),
                title: title.into(),
                category,
                description: String::new(),
                image: String::new(),
                price: None,
            },
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// Returns true if the product is currently in the basket.
    pub fn in_basket(&self) -> bool {
        self.in_basket
    }

    /// Returns true if the product has a price and can be put in the basket.
    pub fn is_purchasable(&self) -> bool {
        self.price.is_some()
    }

    pub(crate) fn set_in_basket(&mut self, in_basket: bool) {
        self.in_basket = in_basket;
    }
}

impl From<ProductData> for Product {
    fn from(data: ProductData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            category: data.category,
            description: data.description,
            image: data.image,
            price: data.price,
            in_basket: false,
        }
    }
}

/// Builder for [`ProductData`], mostly used by fixtures and tests.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    data: ProductData,
}

impl ProductBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.data.description = description.into();
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.data.image = image.into();
        self
    }

    pub fn price(mut self, price: impl Into<Price>) -> Self {
        self.data.price = Some(price.into());
        self
    }

    /// Returns the wire representation, ready for `Catalog::set_products`.
    pub fn build(self) -> ProductData {
        self.data
    }
}
