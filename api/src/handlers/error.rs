//! Mapping from domain errors to HTTP responses.
//!
//! Every failure leaves the API as an [`ErrorResponse`] body
//! (`{error, message, details?, timestamp}`). Internal errors are logged
//! and replaced by a generic message.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mp_core::errors::DomainError;
use mp_shared::{error_codes, ErrorResponse};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error type returned by every route handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body failed DTO validation
    #[error("Invalid request data")]
    InvalidRequest(#[from] validator::ValidationErrors),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => error_codes::VALIDATION_ERROR,
            ApiError::Domain(error) => match error {
                DomainError::NotFound { .. } => error_codes::NOT_FOUND,
                DomainError::Validation(_) => error_codes::VALIDATION_ERROR,
                DomainError::InvalidTransition { .. } => error_codes::INVALID_TRANSITION,
                DomainError::Unauthorized => error_codes::UNAUTHORIZED,
                DomainError::Forbidden { .. } => error_codes::FORBIDDEN,
                DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            },
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::InvalidRequest(errors) => {
                ErrorResponse::new(self.code(), "Invalid request data")
                    .add_detail("fields", field_messages(errors))
            }
            ApiError::Domain(error) => match error {
                DomainError::NotFound { resource } => {
                    ErrorResponse::new(self.code(), format!("{} not found", resource))
                        .add_detail("resource", resource.to_lowercase())
                }
                DomainError::Validation(validation) => {
                    let response = ErrorResponse::new(self.code(), validation.to_string());
                    match validation.field() {
                        Some(field) => response.add_detail("field", field),
                        None => response,
                    }
                }
                DomainError::InvalidTransition { from, to } => {
                    ErrorResponse::new(self.code(), error.to_string())
                        .add_detail("from", from)
                        .add_detail("to", to)
                }
                DomainError::Unauthorized => {
                    ErrorResponse::new(self.code(), "Authentication required")
                }
                DomainError::Forbidden { reason } => ErrorResponse::new(self.code(), reason.clone()),
                DomainError::Internal { .. } => {
                    ErrorResponse::new(self.code(), "An internal error occurred")
                }
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(error) => match error {
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
                DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
                DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
                DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        HttpResponse::build(status).json(self.body())
    }
}

/// Validation messages keyed by field name
fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
