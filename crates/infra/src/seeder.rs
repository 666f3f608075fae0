//! Inventory seeding service: clear → expand → upsert, per base SKU.
//!
//! Expansion is pure, so every item is expanded before the sink is touched.
//! Under [`FailurePolicy::Halt`] an invalid item therefore aborts the run
//! without any writes. Under [`FailurePolicy::Skip`] it is reported and the
//! remaining items are seeded.
//!
//! Clearing covers every base SKU in the batch, including skipped ones, so a
//! re-run never leaves a stale dataset behind for a SKU the feed still lists.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use shopseed_core::{BaseSku, SeedError};
use shopseed_inventory::{expand, InventoryRow, SeedItem, VariationPlan};

use crate::config::FailurePolicy;
use crate::store::{InventorySink, StoreError};

#[derive(Debug, Error)]
pub enum SeederError {
    #[error("cannot expand {sku}: {source}")]
    Expansion {
        sku: String,
        #[source]
        source: SeedError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An item left out of the run, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub sku: String,
    pub reason: String,
}

/// Outcome of one seeding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Items written (unvaried or expanded).
    pub products_seeded: usize,
    /// Variant rows created for items that have at least one axis.
    pub variant_skus_created: usize,
    pub rows_written: u64,
    pub rows_cleared: u64,
    pub skipped: Vec<SkippedItem>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SeedReport {
    fn started(started_at: DateTime<Utc>) -> Self {
        Self {
            products_seeded: 0,
            variant_skus_created: 0,
            rows_written: 0,
            rows_cleared: 0,
            skipped: Vec::new(),
            started_at,
            finished_at: started_at,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

struct Planned<'a> {
    item: &'a SeedItem,
    rows: Vec<InventoryRow>,
    varied: bool,
}

pub struct InventorySeeder<S> {
    sink: S,
    policy: FailurePolicy,
}

impl<S: InventorySink> InventorySeeder<S> {
    pub fn new(sink: S, policy: FailurePolicy) -> Self {
        Self { sink, policy }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Seed `items` into the sink, replacing any previous demo dataset.
    #[instrument(skip_all, fields(items = items.len(), policy = ?self.policy), err)]
    pub async fn seed(&self, items: &[SeedItem]) -> Result<SeedReport, SeederError> {
        let mut report = SeedReport::started(Utc::now());

        let planned = self.plan(items, &mut report)?;

        let mut cleared = HashSet::new();
        for item in items {
            let Ok(base) = BaseSku::parse(item.base_sku()) else {
                continue;
            };
            if cleared.insert(base.clone()) {
                report.rows_cleared += self.sink.clear_base_sku(&base).await?;
            }
        }
        info!(rows_cleared = report.rows_cleared, "cleared existing demo inventory");

        for Planned { item, rows, varied } in planned {
            report.rows_written += self.sink.upsert_rows(&rows).await?;
            report.products_seeded += 1;
            if varied {
                report.variant_skus_created += rows.len();
                info!(sku = %item.base_sku(), variants = rows.len(), "created variants");
            } else {
                info!(
                    sku = %item.base_sku(),
                    quantity = item.totals.quantity_available,
                    "created inventory"
                );
            }
        }

        report.finished_at = Utc::now();
        info!(
            products_seeded = report.products_seeded,
            variant_skus_created = report.variant_skus_created,
            skipped = report.skipped.len(),
            "inventory seeded"
        );
        Ok(report)
    }

    fn plan<'a>(
        &self,
        items: &'a [SeedItem],
        report: &mut SeedReport,
    ) -> Result<Vec<Planned<'a>>, SeederError> {
        let mut planned = Vec::with_capacity(items.len());
        for item in items {
            match expand(&item.spec, &item.totals) {
                Ok(rows) => {
                    let varied = VariationPlan::resolve(&item.spec).is_varied();
                    debug!(sku = %item.base_sku(), rows = rows.len(), varied, "expanded");
                    planned.push(Planned { item, rows, varied });
                }
                Err(source) => match self.policy {
                    FailurePolicy::Halt => {
                        return Err(SeederError::Expansion {
                            sku: item.base_sku().to_owned(),
                            source,
                        });
                    }
                    FailurePolicy::Skip => {
                        warn!(
                            sku = %item.base_sku(),
                            kind = source.kind(),
                            error = %source,
                            "skipping item"
                        );
                        report.skipped.push(SkippedItem {
                            sku: item.base_sku().to_owned(),
                            reason: source.to_string(),
                        });
                    }
                },
            }
        }
        Ok(planned)
    }
}
