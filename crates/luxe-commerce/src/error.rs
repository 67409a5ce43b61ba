//! Commerce error types.

use thiserror::Error;

/// Errors from domain-level commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A variant axis with multiple values needs an explicit choice.
    #[error("Missing selection for {axis}")]
    MissingSelection { axis: String },

    /// A choice referenced an axis the product does not declare.
    #[error("Product has no variant axis named {axis}")]
    UnknownAxis { axis: String },

    /// A choice referenced a value the axis does not offer.
    #[error("Variant axis {axis} has no value {value}")]
    UnknownAxisValue { axis: String, value: String },

    /// Rating outside the 1-5 range.
    #[error("Invalid rating: {0}")]
    InvalidRating(i32),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Unrecognized status string.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}
