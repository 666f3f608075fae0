//! Splitting one product's aggregate totals across its variants.
//!
//! Quantities are conserved whenever there is at least one unit per variant:
//! each variant gets `quantity / n`, and the first `quantity % n` variants get
//! one extra unit. When there are fewer units than variants, every variant is
//! still stocked with one unit, so the emitted total exceeds the input. Seeded
//! demo data favors "every variant is purchasable" over exact conservation.
//!
//! Reorder level and max stock are thresholds rather than stock, so they are
//! divided independently and clamped to their own floors. Their per-variant
//! sums need not relate to the original totals.

use crate::model::InventoryTotals;

/// Lowest quantity any variant is seeded with.
pub const MIN_VARIANT_QUANTITY: i64 = 1;

/// Lowest per-variant reorder level.
pub const MIN_VARIANT_REORDER_LEVEL: i64 = 1;

/// Lowest per-variant max stock.
pub const MIN_VARIANT_MAX_STOCK: i64 = 10;

/// Per-variant share of one product's totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Quantity for each variant, in enumeration order.
    pub quantities: Vec<i64>,
    pub reorder_level: i64,
    pub max_stock: i64,
}

impl Distribution {
    pub fn total_quantity(&self) -> i64 {
        self.quantities.iter().sum()
    }
}

/// Distribute `totals` across `variants` rows.
///
/// Expects validated (non-negative) totals. Zero variants yields no
/// quantities; thresholds are then computed as for a single variant.
pub fn distribute(totals: &InventoryTotals, variants: usize) -> Distribution {
    let n = i64::try_from(variants.max(1)).unwrap_or(i64::MAX);
    let available = totals.quantity_available;

    let quantities = if available < n {
        vec![MIN_VARIANT_QUANTITY; variants]
    } else {
        let base_share = (available / n).max(MIN_VARIANT_QUANTITY);
        // remainder < n, which came from a usize
        let remainder = (available % n) as usize;
        (0..variants)
            .map(|index| base_share + i64::from(index < remainder))
            .collect()
    };

    Distribution {
        quantities,
        reorder_level: (totals.reorder_level / n).max(MIN_VARIANT_REORDER_LEVEL),
        max_stock: (totals.max_stock / n).max(MIN_VARIANT_MAX_STOCK),
    }
}
