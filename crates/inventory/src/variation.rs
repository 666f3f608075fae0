//! Variation axes and the per-product expansion plan.

use serde::{Deserialize, Serialize};

use shopseed_core::BaseSku;

use crate::model::ProductVariationSpec;

/// Normalize a variation token into the code used inside a variant SKU.
///
/// The token is uppercased. With `substitute_spaces`, every whitespace
/// character is additionally replaced by `-`. Nothing else changes: no
/// trimming, no collapsing of repeated whitespace, no character filtering.
///
/// ```
/// use shopseed_inventory::normalize;
///
/// assert_eq!(normalize("Navy Blue", true), "NAVY-BLUE");
/// assert_eq!(normalize("One Size", false), "ONE SIZE");
/// ```
pub fn normalize(token: &str, substitute_spaces: bool) -> String {
    let mut code = String::with_capacity(token.len());
    for c in token.chars() {
        if substitute_spaces && c.is_whitespace() {
            code.push('-');
        } else {
            code.extend(c.to_uppercase());
        }
    }
    code
}

/// An independent dimension of product variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Color,
    Size,
}

impl Axis {
    /// Colors have whitespace hyphenated; sizes are only uppercased.
    pub fn substitutes_spaces(self) -> bool {
        matches!(self, Axis::Color)
    }

    pub fn code(self, token: &str) -> String {
        normalize(token, self.substitutes_spaces())
    }
}

/// Which variants a product expands into, resolved once per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationPlan<'a> {
    /// Every color crossed with every size (colors outer, sizes inner).
    Cartesian {
        colors: &'a [String],
        sizes: &'a [String],
    },
    /// Exactly one axis carries tokens.
    SingleAxis { axis: Axis, tokens: &'a [String] },
    /// No axes: the base SKU is the only row.
    Unvaried,
}

impl<'a> VariationPlan<'a> {
    pub fn resolve(spec: &'a ProductVariationSpec) -> Self {
        match (spec.colors.is_empty(), spec.sizes.is_empty()) {
            (false, false) => VariationPlan::Cartesian {
                colors: &spec.colors,
                sizes: &spec.sizes,
            },
            (true, false) => VariationPlan::SingleAxis {
                axis: Axis::Size,
                tokens: &spec.sizes,
            },
            (false, true) => VariationPlan::SingleAxis {
                axis: Axis::Color,
                tokens: &spec.colors,
            },
            (true, true) => VariationPlan::Unvaried,
        }
    }

    /// Number of rows the plan produces (1 for an unvaried product).
    pub fn variant_count(&self) -> usize {
        match self {
            VariationPlan::Cartesian { colors, sizes } => colors.len() * sizes.len(),
            VariationPlan::SingleAxis { tokens, .. } => tokens.len(),
            VariationPlan::Unvaried => 1,
        }
    }

    pub fn is_varied(&self) -> bool {
        !matches!(self, VariationPlan::Unvaried)
    }

    /// Variant SKUs in enumeration order.
    pub fn variant_skus(&self, base: &BaseSku) -> Vec<String> {
        match self {
            VariationPlan::Cartesian { colors, sizes } => {
                let size_codes: Vec<String> = sizes.iter().map(|s| Axis::Size.code(s)).collect();
                let mut skus = Vec::with_capacity(self.variant_count());
                for color in colors.iter() {
                    let color_code = Axis::Color.code(color);
                    for size_code in &size_codes {
                        skus.push(base.variant(&[color_code.as_str(), size_code.as_str()]));
                    }
                }
                skus
            }
            VariationPlan::SingleAxis { axis, tokens } => tokens
                .iter()
                .map(|token| base.variant(&[axis.code(token)]))
                .collect(),
            VariationPlan::Unvaried => vec![base.as_str().to_owned()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(sku: &str) -> BaseSku {
        BaseSku::parse(sku).unwrap()
    }

    #[test]
    fn normalize_uppercases_without_substitution() {
        assert_eq!(normalize("Paperback", false), "PAPERBACK");
        assert_eq!(normalize("x large", false), "X LARGE");
    }

    #[test]
    fn normalize_substitutes_every_whitespace_character() {
        assert_eq!(normalize("Navy Blue", true), "NAVY-BLUE");
        assert_eq!(normalize("a  b", true), "A--B");
        assert_eq!(normalize("dark\tgrey", true), "DARK-GREY");
        assert_eq!(normalize(" red ", true), "-RED-");
    }

    #[test]
    fn normalize_leaves_punctuation_and_digits_alone() {
        assert_eq!(normalize("10.5 us/eu", true), "10.5-US/EU");
        assert_eq!(normalize("32x34", false), "32X34");
    }

    #[test]
    fn axis_codes_follow_their_normalization_rule() {
        assert_eq!(Axis::Color.code("Off White"), "OFF-WHITE");
        assert_eq!(Axis::Size.code("One Size"), "ONE SIZE");
    }

    #[test]
    fn resolve_picks_the_case_from_axis_presence() {
        let both = ProductVariationSpec::new("A").with_colors(["Red"]).with_sizes(["M"]);
        assert!(matches!(VariationPlan::resolve(&both), VariationPlan::Cartesian { .. }));

        let sizes = ProductVariationSpec::new("A").with_sizes(["M"]);
        assert!(matches!(
            VariationPlan::resolve(&sizes),
            VariationPlan::SingleAxis { axis: Axis::Size, .. }
        ));

        let colors = ProductVariationSpec::new("A").with_colors(["Red"]);
        assert!(matches!(
            VariationPlan::resolve(&colors),
            VariationPlan::SingleAxis { axis: Axis::Color, .. }
        ));

        let none = ProductVariationSpec::new("A");
        assert_eq!(VariationPlan::resolve(&none), VariationPlan::Unvaried);
        assert!(!VariationPlan::resolve(&none).is_varied());
    }

    #[test]
    fn cartesian_enumerates_colors_outer_sizes_inner() {
        let spec = ProductVariationSpec::new("SKU1")
            .with_colors(["Black", "Sky Blue"])
            .with_sizes(["M", "x l"]);
        let plan = VariationPlan::resolve(&spec);

        assert_eq!(plan.variant_count(), 4);
        assert_eq!(
            plan.variant_skus(&base("SKU1")),
            vec!["SKU1-BLACK-M", "SKU1-BLACK-X L", "SKU1-SKY-BLUE-M", "SKU1-SKY-BLUE-X L"]
        );
    }

    #[test]
    fn single_color_axis_hyphenates_spaces() {
        let spec = ProductVariationSpec::new("MUG").with_colors(["Forest Green", "White"]);
        let plan = VariationPlan::resolve(&spec);
        assert_eq!(plan.variant_skus(&base("MUG")), vec!["MUG-FOREST-GREEN", "MUG-WHITE"]);
    }

    #[test]
    fn unvaried_plan_yields_the_base_sku() {
        let spec = ProductVariationSpec::new("X");
        let plan = VariationPlan::resolve(&spec);
        assert_eq!(plan.variant_count(), 1);
        assert_eq!(plan.variant_skus(&base("X")), vec!["X"]);
    }
}
