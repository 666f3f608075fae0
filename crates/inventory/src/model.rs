use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopseed_core::{BaseSku, SeedError, SeedResult, ValueObject};

/// Variation axes of one catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariationSpec {
    pub base_sku: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl ProductVariationSpec {
    /// A spec with no variation axes.
    pub fn new(base_sku: impl Into<String>) -> Self {
        Self {
            base_sku: base_sku.into(),
            colors: Vec::new(),
            sizes: Vec::new(),
        }
    }

    pub fn with_colors<I, T>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sizes<I, T>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the spec and return its typed base SKU.
    pub fn validate(&self) -> SeedResult<BaseSku> {
        BaseSku::parse(self.base_sku.as_str())
    }
}

impl ValueObject for ProductVariationSpec {}

/// Aggregate stock figures for one base SKU, as supplied by the catalog feed.
///
/// Fields are signed so malformed feed data can be represented and rejected
/// by [`InventoryTotals::validate`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTotals {
    pub quantity_available: i64,
    pub quantity_reserved: i64,
    pub reorder_level: i64,
    pub max_stock: i64,
    pub cost_per_unit: Decimal,
}

impl Default for InventoryTotals {
    /// Mirrors the `inventory_items` column defaults.
    fn default() -> Self {
        Self {
            quantity_available: 0,
            quantity_reserved: 0,
            reorder_level: 10,
            max_stock: 1000,
            cost_per_unit: Decimal::ZERO,
        }
    }
}

impl InventoryTotals {
    pub fn validate(&self) -> SeedResult<()> {
        non_negative("quantity_available", self.quantity_available)?;
        non_negative("quantity_reserved", self.quantity_reserved)?;
        non_negative("reorder_level", self.reorder_level)?;
        non_negative("max_stock", self.max_stock)?;
        if self.cost_per_unit.is_sign_negative() && !self.cost_per_unit.is_zero() {
            return Err(SeedError::invalid_totals(format!(
                "cost_per_unit cannot be negative (got {})",
                self.cost_per_unit
            )));
        }
        Ok(())
    }
}

impl ValueObject for InventoryTotals {}

fn non_negative(field: &str, value: i64) -> SeedResult<()> {
    if value < 0 {
        return Err(SeedError::invalid_totals(format!(
            "{field} cannot be negative (got {value})"
        )));
    }
    Ok(())
}

/// One concrete inventory record, ready to be written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub sku: String,
    pub quantity_available: i64,
    pub quantity_reserved: i64,
    pub reorder_level: i64,
    pub max_stock: i64,
    pub cost_per_unit: Decimal,
}

impl InventoryRow {
    /// Row for a product without variants: totals are copied verbatim.
    pub fn unvaried(base_sku: &BaseSku, totals: &InventoryTotals) -> Self {
        Self {
            sku: base_sku.as_str().to_owned(),
            quantity_available: totals.quantity_available,
            quantity_reserved: totals.quantity_reserved,
            reorder_level: totals.reorder_level,
            max_stock: totals.max_stock,
            cost_per_unit: totals.cost_per_unit,
        }
    }
}

impl ValueObject for InventoryRow {}

/// Input to one seeding step: a product's axes plus its aggregate totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedItem {
    pub spec: ProductVariationSpec,
    pub totals: InventoryTotals,
}

impl SeedItem {
    pub fn new(spec: ProductVariationSpec, totals: InventoryTotals) -> Self {
        Self { spec, totals }
    }

    pub fn base_sku(&self) -> &str {
        &self.spec.base_sku
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_totals_match_column_defaults() {
        let totals = InventoryTotals::default();
        assert_eq!(totals.quantity_available, 0);
        assert_eq!(totals.quantity_reserved, 0);
        assert_eq!(totals.reorder_level, 10);
        assert_eq!(totals.max_stock, 1000);
        assert_eq!(totals.cost_per_unit, Decimal::ZERO);
        assert!(totals.validate().is_ok());
    }

    #[test]
    fn validate_rejects_each_negative_field() {
        let cases = [
            InventoryTotals { quantity_available: -1, ..InventoryTotals::default() },
            InventoryTotals { quantity_reserved: -1, ..InventoryTotals::default() },
            InventoryTotals { reorder_level: -1, ..InventoryTotals::default() },
            InventoryTotals { max_stock: -1, ..InventoryTotals::default() },
            InventoryTotals { cost_per_unit: Decimal::new(-1, 2), ..InventoryTotals::default() },
        ];
        for totals in cases {
            let err = totals.validate().unwrap_err();
            assert!(matches!(err, SeedError::InvalidTotals(_)), "{totals:?}");
        }
    }

    #[test]
    fn validate_names_the_offending_field() {
        let totals = InventoryTotals { max_stock: -5, ..InventoryTotals::default() };
        assert_eq!(
            totals.validate().unwrap_err(),
            SeedError::invalid_totals("max_stock cannot be negative (got -5)")
        );
    }

    #[test]
    fn spec_validation_rejects_blank_base_sku() {
        let err = ProductVariationSpec::new("  ").validate().unwrap_err();
        assert!(matches!(err, SeedError::InvalidSpec(_)));
    }

    #[test]
    fn spec_deserializes_with_missing_axes() {
        let spec: ProductVariationSpec = serde_json::from_str(r#"{"base_sku":"X"}"#).unwrap();
        assert_eq!(spec, ProductVariationSpec::new("X"));
    }

    #[test]
    fn unvaried_row_copies_totals() {
        let base = BaseSku::parse("X").unwrap();
        let totals = InventoryTotals {
            quantity_available: 50,
            quantity_reserved: 3,
            reorder_level: 7,
            max_stock: 200,
            cost_per_unit: Decimal::new(1299, 2),
        };
        let row = InventoryRow::unvaried(&base, &totals);
        assert_eq!(row.sku, "X");
        assert_eq!(row.quantity_available, 50);
        assert_eq!(row.quantity_reserved, 3);
        assert_eq!(row.reorder_level, 7);
        assert_eq!(row.max_stock, 200);
        assert_eq!(row.cost_per_unit, Decimal::new(1299, 2));
    }
}
