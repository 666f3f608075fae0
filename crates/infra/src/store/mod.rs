//! Inventory storage boundary.
//!
//! The seeder only needs two write operations from storage: remove whatever a
//! previous run left for a base SKU, then bulk-upsert the fresh expansion. The
//! read operations exist for verification and dry runs.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use shopseed_core::BaseSku;
use shopseed_inventory::InventoryRow;

pub use in_memory::InMemoryInventorySink;
pub use postgres::PostgresInventorySink;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Key-based inventory storage, keyed by `sku`.
#[async_trait]
pub trait InventorySink: Send + Sync {
    /// Remove the row for `base` and every row whose SKU starts with `base-`.
    ///
    /// Returns the number of inventory rows removed.
    async fn clear_base_sku(&self, base: &BaseSku) -> Result<u64, StoreError>;

    /// Insert or replace `rows`, keyed by SKU. Returns the number of rows written.
    async fn upsert_rows(&self, rows: &[InventoryRow]) -> Result<u64, StoreError>;

    async fn get(&self, sku: &str) -> Result<Option<InventoryRow>, StoreError>;

    /// Every stored row, ordered by SKU.
    async fn list(&self) -> Result<Vec<InventoryRow>, StoreError>;
}

#[async_trait]
impl<S> InventorySink for Arc<S>
where
    S: InventorySink + ?Sized,
{
    async fn clear_base_sku(&self, base: &BaseSku) -> Result<u64, StoreError> {
        (**self).clear_base_sku(base).await
    }

    async fn upsert_rows(&self, rows: &[InventoryRow]) -> Result<u64, StoreError> {
        (**self).upsert_rows(rows).await
    }

    async fn get(&self, sku: &str) -> Result<Option<InventoryRow>, StoreError> {
        (**self).get(sku).await
    }

    async fn list(&self) -> Result<Vec<InventoryRow>, StoreError> {
        (**self).list().await
    }
}
