//! Raw records as they appear in the catalog JSON files.
//!
//! Fields the seeder does not use (names, prices, images, ...) are ignored on
//! deserialization.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopseed_inventory::InventoryTotals;

/// Product document from `products.json`; only the variation axes matter here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

/// Stock entry from `inventory.json`, keyed by base SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub sku: String,
    pub quantity_available: i64,
    #[serde(default)]
    pub quantity_reserved: i64,
    #[serde(default = "default_reorder_level")]
    pub reorder_level: i64,
    #[serde(default = "default_max_stock")]
    pub max_stock: i64,
    #[serde(default)]
    pub cost_per_unit: Decimal,
}

fn default_reorder_level() -> i64 {
    InventoryTotals::default().reorder_level
}

fn default_max_stock() -> i64 {
    InventoryTotals::default().max_stock
}

impl InventoryRecord {
    pub fn totals(&self) -> InventoryTotals {
        InventoryTotals {
            quantity_available: self.quantity_available,
            quantity_reserved: self.quantity_reserved,
            reorder_level: self.reorder_level,
            max_stock: self.max_stock,
            cost_per_unit: self.cost_per_unit,
        }
    }
}
