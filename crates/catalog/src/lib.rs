//! Catalog feed module.
//!
//! Reads the demo catalog (inventory totals and product variation axes) and
//! joins it into the seed items the inventory expander consumes.

pub mod error;
pub mod feed;
pub mod record;

pub use error::FeedError;
pub use feed::{load_records, CatalogFeed, INVENTORY_FILE, PRODUCTS_FILE};
pub use record::{InventoryRecord, ProductRecord};
