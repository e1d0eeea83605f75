//! Error types for the pricing crate.

use thiserror::Error;

/// Problems with a rate table loaded from settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatesError {
    /// A rate that must be positive is zero, negative or not a number.
    #[error("Rate '{name}' must be positive, got {value}")]
    NotPositive { name: String, value: f64 },

    /// Distance bands must have strictly increasing ceilings.
    #[error("Distance bands must be sorted by increasing mileage")]
    UnsortedBands,

    /// A ZIP code that must be five digits is not.
    #[error("Invalid ZIP code: {0}")]
    InvalidZip(String),

    /// A template has no add-on price.
    #[error("Missing add-on price for sink template '{0}'")]
    MissingSinkPrice(String),
}
