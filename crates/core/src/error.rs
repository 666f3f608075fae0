//! Seeding error model.

use thiserror::Error;

/// Result type used by the expansion layer.
pub type SeedResult<T> = Result<T, SeedError>;

/// Failure to turn one catalog record into inventory rows.
///
/// Both variants are deterministic input problems: nothing here is worth
/// retrying. They abort the record they were raised for, and the caller decides
/// whether the rest of the batch continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// The product variation spec is malformed (e.g. missing base SKU).
    #[error("invalid product spec: {0}")]
    InvalidSpec(String),

    /// The inventory totals contain a value outside the allowed range.
    #[error("invalid inventory totals: {0}")]
    InvalidTotals(String),
}

impl SeedError {
    pub fn invalid_spec(msg: impl Into<String>) -> Self {
        Self::InvalidSpec(msg.into())
    }

    pub fn invalid_totals(msg: impl Into<String>) -> Self {
        Self::InvalidTotals(msg.into())
    }

    /// Stable, machine-readable kind for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SeedError::InvalidSpec(_) => "invalid_spec",
            SeedError::InvalidTotals(_) => "invalid_totals",
        }
    }
}
