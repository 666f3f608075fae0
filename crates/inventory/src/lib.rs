//! Inventory seeding domain module.
//!
//! This crate turns catalog-level product records into concrete inventory rows,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod distribution;
pub mod expander;
pub mod model;
pub mod variation;

pub use distribution::{
    distribute, Distribution, MIN_VARIANT_MAX_STOCK, MIN_VARIANT_QUANTITY,
    MIN_VARIANT_REORDER_LEVEL,
};
pub use expander::expand;
pub use model::{InventoryRow, InventoryTotals, ProductVariationSpec, SeedItem};
pub use variation::{normalize, Axis, VariationPlan};
