//! Checks whether a product page currently lists the item as in stock.
//!
//! The core is [`Checker::check`]: fetch the page, extract the stock-status
//! marker, return a normalized [`AvailabilityResult`]. Everything around it
//! (CLI, trigger payload, notification sinks) is thin glue over that one
//! stateless call.

pub mod checker;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod notify;
pub mod parser;
pub mod trigger;

pub use checker::Checker;
pub use error::InvalidInput;
pub use models::{AvailabilityResult, AvailabilityStatus};
pub use parser::{MarkerConfig, StockMarkers};

/// ASUS ROG Zephyrus G14 product page, checked when no URL is given.
pub const DEFAULT_PRODUCT_URL: &str = "https://www.bestbuy.ca/en-ca/product/14575597";
