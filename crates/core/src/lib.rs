//! `shopseed-core` — shared building blocks for inventory seeding.
//!
//! This crate contains **pure** primitives (no infrastructure concerns).

pub mod error;
pub mod sku;
pub mod value_object;

pub use error::{SeedError, SeedResult};
pub use sku::BaseSku;
pub use value_object::ValueObject;
