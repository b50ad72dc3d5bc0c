//! Validation error types
//!
//! These errors represent input and business-rule validation failures.
//! Each variant maps to HTTP 400 in the presentation layer.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("{field} is too short (min: {min}, actual: {actual})")]
    TooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("{field} is too long (max: {max}, actual: {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("The minimum price cannot be greater than the maximum price")]
    PriceRangeInverted,

    #[error("{field} cannot be negative")]
    NegativeAmount { field: String },

    #[error("{field} is too large (max: {max})")]
    TooLarge { field: String, max: Decimal },

    #[error("Offer does not belong to this order")]
    OfferOrderMismatch,

    #[error("Offer was submitted by another provider")]
    OfferProviderMismatch,

    #[error("Order already declined by this provider")]
    DuplicateDecline,

    #[error("Duplicate value: {field}")]
    DuplicateValue { field: String },

    #[error("Invalid action: {action}")]
    InvalidAction { action: String },
}

impl ValidationError {
    /// Field the error refers to, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::NegativeAmount { field }
            | ValidationError::TooLarge { field, .. }
            | ValidationError::DuplicateValue { field } => Some(field),
            ValidationError::PriceRangeInverted => Some("proposed_price_range_min"),
            ValidationError::OfferOrderMismatch
            | ValidationError::OfferProviderMismatch => Some("offer_id"),
            ValidationError::DuplicateDecline => Some("order_id"),
            ValidationError::InvalidAction { .. } => Some("action"),
        }
    }
}
