//! Postgres-backed inventory sink.
//!
//! Expects the inventory-service schema to exist already:
//!
//! ```sql
//! CREATE TABLE inventory_items (
//!     id                 BIGSERIAL PRIMARY KEY,
//!     sku                VARCHAR(100) NOT NULL UNIQUE,
//!     quantity_available BIGINT NOT NULL DEFAULT 0,
//!     quantity_reserved  BIGINT NOT NULL DEFAULT 0,
//!     reorder_level      BIGINT NOT NULL DEFAULT 10,
//!     max_stock          BIGINT NOT NULL DEFAULT 1000,
//!     cost_per_unit      NUMERIC(10,2) DEFAULT 0.00,
//!     last_restocked     TIMESTAMPTZ NULL,
//!     created_at         TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at         TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! `reservations` and `stock_movements` reference `inventory_items(sku)`, so
//! clearing deletes from them first.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database | `Database` |
//! | PoolClosed / PoolTimedOut / Io | `Unavailable` |
//! | Other | `Database` |

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, instrument};

use shopseed_core::BaseSku;
use shopseed_inventory::InventoryRow;

use super::{InventorySink, StoreError};
use crate::config::SeederConfig;

/// Rows per INSERT statement; keeps bind parameters well under Postgres' limit.
const UPSERT_CHUNK: usize = 1_000;

const CLEAR_STOCK_MOVEMENTS: &str =
    r#"DELETE FROM stock_movements WHERE sku = $1 OR sku LIKE $2 ESCAPE '\'"#;
const CLEAR_RESERVATIONS: &str =
    r#"DELETE FROM reservations WHERE sku = $1 OR sku LIKE $2 ESCAPE '\'"#;
const CLEAR_INVENTORY_ITEMS: &str =
    r#"DELETE FROM inventory_items WHERE sku = $1 OR sku LIKE $2 ESCAPE '\'"#;

/// Inventory sink writing to the inventory-service `inventory_items` table.
///
/// Each clear and each bulk upsert runs in its own transaction.
#[derive(Debug, Clone)]
pub struct PostgresInventorySink {
    pool: Arc<PgPool>,
}

impl PostgresInventorySink {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against the configured database.
    #[instrument(skip(config), fields(db_target = config.database_target().unwrap_or("<unset>")), err)]
    pub async fn connect(config: &SeederConfig) -> Result<Self, StoreError> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("no database url configured".into()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl InventorySink for PostgresInventorySink {
    #[instrument(skip(self, base), fields(base_sku = %base), err)]
    async fn clear_base_sku(&self, base: &BaseSku) -> Result<u64, StoreError> {
        let pattern = like_prefix_pattern(base);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("clear_base_sku", e))?;

        for statement in [CLEAR_STOCK_MOVEMENTS, CLEAR_RESERVATIONS] {
            sqlx::query(statement)
                .bind(base.as_str())
                .bind(&pattern)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("clear_base_sku", e))?;
        }

        let removed = sqlx::query(CLEAR_INVENTORY_ITEMS)
            .bind(base.as_str())
            .bind(&pattern)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("clear_base_sku", e))?
            .rows_affected();

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("clear_base_sku", e))?;

        debug!(removed, "cleared inventory rows");
        Ok(removed)
    }

    #[instrument(skip(self, rows), fields(row_count = rows.len()), err)]
    async fn upsert_rows(&self, rows: &[InventoryRow]) -> Result<u64, StoreError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("upsert_rows", e))?;

        let mut written = 0;
        for chunk in rows.chunks(UPSERT_CHUNK) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO inventory_items \
                 (sku, quantity_available, quantity_reserved, reorder_level, max_stock, cost_per_unit) ",
            );
            builder.push_values(chunk, |mut b, row| {
                b.push_bind(row.sku.as_str())
                    .push_bind(row.quantity_available)
                    .push_bind(row.quantity_reserved)
                    .push_bind(row.reorder_level)
                    .push_bind(row.max_stock)
                    .push_bind(row.cost_per_unit);
            });
            builder.push(
                " ON CONFLICT (sku) DO UPDATE SET \
                 quantity_available = EXCLUDED.quantity_available, \
                 quantity_reserved = EXCLUDED.quantity_reserved, \
                 reorder_level = EXCLUDED.reorder_level, \
                 max_stock = EXCLUDED.max_stock, \
                 cost_per_unit = EXCLUDED.cost_per_unit, \
                 updated_at = NOW()",
            );

            written += builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("upsert_rows", e))?
                .rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("upsert_rows", e))?;

        Ok(written)
    }

    #[instrument(skip(self), err)]
    async fn get(&self, sku: &str) -> Result<Option<InventoryRow>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT sku, quantity_available, quantity_reserved, reorder_level, max_stock, cost_per_unit
            FROM inventory_items
            WHERE sku = $1
            "#,
        )
        .bind(sku)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(decode_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<InventoryRow>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT sku, quantity_available, quantity_reserved, reorder_level, max_stock, cost_per_unit
            FROM inventory_items
            ORDER BY sku ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &PgRow) -> Result<InventoryRow, StoreError> {
    let decode = |e| map_sqlx_error("decode_row", e);
    Ok(InventoryRow {
        sku: row.try_get("sku").map_err(decode)?,
        quantity_available: row.try_get("quantity_available").map_err(decode)?,
        quantity_reserved: row.try_get("quantity_reserved").map_err(decode)?,
        reorder_level: row.try_get("reorder_level").map_err(decode)?,
        max_stock: row.try_get("max_stock").map_err(decode)?,
        cost_per_unit: row
            .try_get::<Option<Decimal>, _>("cost_per_unit")
            .map_err(decode)?
            .unwrap_or(Decimal::ZERO),
    })
}

/// `LIKE` pattern matching every variant of `base` (`base-%`), with the
/// base's own wildcard characters escaped.
fn like_prefix_pattern(base: &BaseSku) -> String {
    let prefix = base.variant_prefix();
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Database {
            operation,
            message: db_err.message().to_string(),
        },
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool unavailable in {operation}"))
        }
        sqlx::Error::Io(io_err) => {
            StoreError::Unavailable(format!("io error in {operation}: {io_err}"))
        }
        other => StoreError::Database {
            operation,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(sku: &str) -> BaseSku {
        BaseSku::parse(sku).unwrap()
    }

    #[test]
    fn like_pattern_appends_dash_wildcard() {
        assert_eq!(like_prefix_pattern(&base("SKU1")), "SKU1-%");
    }

    #[test]
    fn like_pattern_escapes_wildcards_in_the_base() {
        assert_eq!(like_prefix_pattern(&base("A_1")), "A\\_1-%");
        assert_eq!(like_prefix_pattern(&base("50%OFF")), "50\\%OFF-%");
        assert_eq!(like_prefix_pattern(&base("X\\Y")), "X\\\\Y-%");
    }

    #[test]
    fn missing_url_is_unavailable() {
        let config = SeederConfig::default();
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let err = rt.block_on(PostgresInventorySink::connect(&config)).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
