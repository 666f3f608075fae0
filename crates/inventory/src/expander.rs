//! Variant expansion: one product record in, one inventory row per SKU out.

use std::collections::HashSet;

use shopseed_core::{SeedError, SeedResult};

use crate::distribution::{distribute, Distribution};
use crate::model::{InventoryRow, InventoryTotals, ProductVariationSpec};
use crate::variation::VariationPlan;

/// Expand a product into concrete inventory rows.
///
/// - both axes: colors × sizes, colors outer
/// - one axis: one row per token
/// - no axes: a single row for the base SKU with `totals` copied verbatim
///
/// Variant rows share the totals through [`distribute`], start with nothing
/// reserved, and keep the unit cost unchanged. Output is deterministic for a
/// given input, including list order.
///
/// Fails with [`SeedError::InvalidSpec`] on a blank base SKU or when two
/// tokens normalize to the same variant SKU, and with
/// [`SeedError::InvalidTotals`] on any negative total.
pub fn expand(spec: &ProductVariationSpec, totals: &InventoryTotals) -> SeedResult<Vec<InventoryRow>> {
    let base = spec.validate()?;
    totals.validate()?;

    let plan = VariationPlan::resolve(spec);
    if !plan.is_varied() {
        return Ok(vec![InventoryRow::unvaried(&base, totals)]);
    }

    let skus = plan.variant_skus(&base);
    ensure_unique(&skus)?;

    let Distribution {
        quantities,
        reorder_level,
        max_stock,
    } = distribute(totals, skus.len());

    Ok(skus
        .into_iter()
        .zip(quantities)
        .map(|(sku, quantity_available)| InventoryRow {
            sku,
            quantity_available,
            quantity_reserved: 0,
            reorder_level,
            max_stock,
            cost_per_unit: totals.cost_per_unit,
        })
        .collect())
}

fn ensure_unique(skus: &[String]) -> SeedResult<()> {
    let mut seen = HashSet::with_capacity(skus.len());
    for sku in skus {
        if !seen.insert(sku.as_str()) {
            return Err(SeedError::invalid_spec(format!(
                "variant sku {sku} is produced more than once"
            )));
        }
    }
    Ok(())
}
