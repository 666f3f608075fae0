use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use shopseed_inventory::{ProductVariationSpec, SeedItem};

use crate::error::FeedError;
use crate::record::{InventoryRecord, ProductRecord};

pub const INVENTORY_FILE: &str = "inventory.json";
pub const PRODUCTS_FILE: &str = "products.json";

/// Load a JSON array of records from `path`.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FeedError> {
    if !path.exists() {
        return Err(FeedError::NotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| FeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The demo catalog: stock totals plus the product documents that carry
/// each SKU's variation axes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFeed {
    pub inventory: Vec<InventoryRecord>,
    pub products: Vec<ProductRecord>,
}

impl CatalogFeed {
    pub fn new(inventory: Vec<InventoryRecord>, products: Vec<ProductRecord>) -> Self {
        Self { inventory, products }
    }

    /// Read `inventory.json` and `products.json` from `data_dir`.
    pub fn load(data_dir: &Path) -> Result<Self, FeedError> {
        let inventory = load_records(&data_dir.join(INVENTORY_FILE))?;
        let products = load_records(&data_dir.join(PRODUCTS_FILE))?;
        debug!(
            inventory = inventory.len(),
            products = products.len(),
            data_dir = %data_dir.display(),
            "catalog feed loaded"
        );
        Ok(Self { inventory, products })
    }

    /// Base SKUs of every inventory record, in feed order.
    pub fn demo_base_skus(&self) -> Vec<&str> {
        self.inventory.iter().map(|r| r.sku.as_str()).collect()
    }

    /// Join inventory records with their product's variation axes.
    ///
    /// One item per inventory record, in feed order. A record without a
    /// matching product is treated as unvaried. When several products share a
    /// SKU, the first one wins.
    pub fn seed_items(&self) -> Vec<SeedItem> {
        let mut by_sku: HashMap<&str, &ProductRecord> = HashMap::with_capacity(self.products.len());
        for product in &self.products {
            by_sku.entry(product.sku.as_str()).or_insert(product);
        }

        self.inventory
            .iter()
            .map(|record| {
                let mut spec = ProductVariationSpec::new(record.sku.as_str());
                match by_sku.get(record.sku.as_str()) {
                    Some(product) => {
                        spec.colors = product.colors.clone();
                        spec.sizes = product.sizes.clone();
                    }
                    None => debug!(sku = %record.sku, "no product document; seeding base sku only"),
                }
                SeedItem::new(spec, record.totals())
            })
            .collect()
    }
}
