//! Value object trait: equality by value, not identity.
//!
//! Everything that flows through a seeding run is a value object: a SKU, a set
//! of totals, a row destined for storage. None of them carry identity beyond
//! their attributes.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Totals {
///     quantity_available: i64,
///     reorder_level: i64,
/// }
///
/// impl ValueObject for Totals {}
///
/// let a = Totals { quantity_available: 10, reorder_level: 2 };
/// let b = Totals { quantity_available: 10, reorder_level: 2 };
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
