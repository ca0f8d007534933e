//! Backend client and terminal front end for the storefront.

pub mod api;
pub mod command;
pub mod config;
pub mod error;
pub mod frontend;
pub mod render;
pub mod session;

pub use api::{HttpShopApi, InMemoryShopApi, ShopApi};
pub use config::{Config, LogFormat};
pub use error::{ClientError, Result};
pub use session::ShopSession;
