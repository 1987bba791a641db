//! Domain types and pricing rules for the Joystick storefront.
//!
//! Everything price-related funnels through [`pricing`]: the list, detail,
//! and admin surfaces all reconstruct base prices with the same function, so
//! the rendered numbers can never drift between views.

mod app_config;
mod base_price;
mod config;
pub mod pricing;
mod product;

pub use app_config::AppConfig;
pub use base_price::BasePriceCache;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use product::{Product, ProductForm, SaleUpdate, ValidationError, GENRES, PLATFORM};
