//! Value objects shared by every storefront crate.

mod types;

pub use types::{Price, ProductId};
