//! Catalog-level stock-keeping unit.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{SeedError, SeedResult};
use crate::value_object::ValueObject;

/// Separator between a base SKU and its variant codes.
pub const VARIANT_SEPARATOR: char = '-';

/// Base SKU of a product, before variant expansion.
///
/// The original string is kept verbatim (no trimming or case folding) so an
/// unvaried product round-trips to exactly the SKU the catalog gave us. Only
/// blank values are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BaseSku(String);

impl BaseSku {
    pub fn parse(value: impl Into<String>) -> SeedResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SeedError::invalid_spec("base sku cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix shared by every variant SKU derived from this base (`BASE-`).
    pub fn variant_prefix(&self) -> String {
        let mut prefix = String::with_capacity(self.0.len() + 1);
        prefix.push_str(&self.0);
        prefix.push(VARIANT_SEPARATOR);
        prefix
    }

    /// Build a variant SKU by appending each code after a separator.
    pub fn variant<S: AsRef<str>>(&self, codes: &[S]) -> String {
        let mut sku = self.0.clone();
        for code in codes {
            sku.push(VARIANT_SEPARATOR);
            sku.push_str(code.as_ref());
        }
        sku
    }

    /// Whether `sku` is this base SKU or one of its variants.
    ///
    /// `SKU1` owns `SKU1` and `SKU1-RED`, but not `SKU10`.
    pub fn owns(&self, sku: &str) -> bool {
        match sku.strip_prefix(self.0.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with(VARIANT_SEPARATOR),
            None => false,
        }
    }
}

impl ValueObject for BaseSku {}

impl core::fmt::Display for BaseSku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BaseSku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for BaseSku {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BaseSku {
    type Error = SeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<BaseSku> for String {
    fn from(value: BaseSku) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank_values() {
        assert!(matches!(BaseSku::parse(""), Err(SeedError::InvalidSpec(_))));
        assert!(matches!(BaseSku::parse("   "), Err(SeedError::InvalidSpec(_))));
    }

    #[test]
    fn parse_keeps_value_verbatim() {
        let sku = BaseSku::parse(" tee-01 ").unwrap();
        assert_eq!(sku.as_str(), " tee-01 ");
    }

    #[test]
    fn variant_joins_codes_with_separator() {
        let sku = BaseSku::parse("SKU1").unwrap();
        assert_eq!(sku.variant(&["BLACK", "M"]), "SKU1-BLACK-M");
        assert_eq!(sku.variant(&["XL"]), "SKU1-XL");
        assert_eq!(sku.variant::<&str>(&[]), "SKU1");
        assert_eq!(sku.variant_prefix(), "SKU1-");
    }

    #[test]
    fn owns_matches_base_and_dash_prefixed_variants_only() {
        let sku = BaseSku::parse("SKU1").unwrap();
        assert!(sku.owns("SKU1"));
        assert!(sku.owns("SKU1-BLACK-M"));
        assert!(sku.owns("SKU1-"));
        assert!(!sku.owns("SKU10"));
        assert!(!sku.owns("SKU"));
        assert!(!sku.owns("XSKU1-RED"));
    }

    #[test]
    fn serde_rejects_blank_sku() {
        let ok: BaseSku = serde_json::from_str("\"BOOK1\"").unwrap();
        assert_eq!(ok.as_str(), "BOOK1");
        assert!(serde_json::from_str::<BaseSku>("\"\"").is_err());
    }
}
