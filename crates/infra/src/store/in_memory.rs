use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use shopseed_core::BaseSku;
use shopseed_inventory::InventoryRow;

use super::{InventorySink, StoreError};

/// In-memory inventory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryInventorySink {
    inner: RwLock<BTreeMap<String, InventoryRow>>,
}

impl InMemoryInventorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink pre-populated with `rows`, e.g. a previous run's dataset.
    pub fn with_rows(rows: impl IntoIterator<Item = InventoryRow>) -> Self {
        let map = rows.into_iter().map(|row| (row.sku.clone(), row)).collect();
        Self {
            inner: RwLock::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl InventorySink for InMemoryInventorySink {
    async fn clear_base_sku(&self, base: &BaseSku) -> Result<u64, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let before = map.len();
        map.retain(|sku, _| !base.owns(sku));
        Ok((before - map.len()) as u64)
    }

    async fn upsert_rows(&self, rows: &[InventoryRow]) -> Result<u64, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        for row in rows {
            map.insert(row.sku.clone(), row.clone());
        }
        Ok(rows.len() as u64)
    }

    async fn get(&self, sku: &str) -> Result<Option<InventoryRow>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(sku).cloned())
    }

    async fn list(&self) -> Result<Vec<InventoryRow>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row(sku: &str, quantity_available: i64) -> InventoryRow {
        InventoryRow {
            sku: sku.into(),
            quantity_available,
            quantity_reserved: 0,
            reorder_level: 1,
            max_stock: 10,
            cost_per_unit: Decimal::ONE,
        }
    }

    #[tokio::test]
    async fn clear_removes_base_and_dash_variants_only() {
        let sink = InMemoryInventorySink::with_rows([
            row("SKU1", 1),
            row("SKU1-BLACK-M", 1),
            row("SKU1-WHITE", 1),
            row("SKU10", 1),
            row("SKU10-RED", 1),
            row("OTHER", 1),
        ]);

        let removed = sink.clear_base_sku(&BaseSku::parse("SKU1").unwrap()).await.unwrap();

        assert_eq!(removed, 3);
        let remaining: Vec<String> = sink.list().await.unwrap().into_iter().map(|r| r.sku).collect();
        assert_eq!(remaining, vec!["OTHER", "SKU10", "SKU10-RED"]);
    }

    #[tokio::test]
    async fn clear_treats_like_wildcards_literally() {
        let sink = InMemoryInventorySink::with_rows([row("A_1-X", 1), row("AB1-X", 1)]);

        let removed = sink.clear_base_sku(&BaseSku::parse("A_1").unwrap()).await.unwrap();

        assert_eq!(removed, 1);
        assert!(sink.get("AB1-X").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn upsert_replaces_by_sku() {
        let sink = InMemoryInventorySink::new();
        assert!(sink.is_empty());

        sink.upsert_rows(&[row("SKU1-M", 3), row("SKU1-L", 2)]).await.unwrap();
        let written = sink.upsert_rows(&[row("SKU1-M", 9)]).await.unwrap();

        assert_eq!(written, 1);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("SKU1-M").await.unwrap().unwrap().quantity_available, 9);
        assert!(sink.get("SKU1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_ordered_by_sku() {
        let sink = InMemoryInventorySink::new();
        sink.upsert_rows(&[row("B", 1), row("A", 1), row("C", 1)]).await.unwrap();

        let skus: Vec<String> = sink.list().await.unwrap().into_iter().map(|r| r.sku).collect();
        assert_eq!(skus, vec!["A", "B", "C"]);
    }
}
