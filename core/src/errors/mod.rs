//! Domain-specific error types and error handling.

mod types;

pub use types::ValidationError;

use thiserror::Error;

use crate::domain::entities::order::OrderState;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: OrderState, to: OrderState },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        DomainError::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Whether the error is a `NotFound` for the given resource name
    pub fn is_not_found(&self, resource: &str) -> bool {
        matches!(self, DomainError::NotFound { resource: r } if r == resource)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_conversion() {
        let error: DomainError = ValidationError::PriceRangeInverted.into();
        assert!(matches!(error, DomainError::Validation(ValidationError::PriceRangeInverted)));
        assert_eq!(
            error.to_string(),
            "The minimum price cannot be greater than the maximum price"
        );
    }

    #[test]
    fn test_transition_message() {
        let error = DomainError::InvalidTransition {
            from: OrderState::Pending,
            to: OrderState::Completed,
        };
        assert_eq!(error.to_string(), "Invalid state transition from pending to completed");
    }

    #[test]
    fn test_not_found_helper() {
        let error = DomainError::not_found("Order");
        assert!(error.is_not_found("Order"));
        assert!(!error.is_not_found("Offer"));
    }

    #[test]
    fn test_validation_field() {
        let error = ValidationError::TooShort {
            field: "location".to_string(),
            min: 5,
            actual: 3,
        };
        assert_eq!(error.field(), Some("location"));
        assert!(error.to_string().contains("min: 5"));
    }
}
