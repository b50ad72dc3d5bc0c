//! Order entity and its state machine.
//!
//! An order moves through `pending -> accepted -> completed`, and can be
//! rejected (cancelled) from either of the first two states:
//!
//! | from \ to  | accepted | completed | rejected |
//! |------------|----------|-----------|----------|
//! | pending    | yes      | no        | yes      |
//! | accepted   | no       | yes       | yes      |
//! | completed  | no       | no        | no       |
//! | rejected   | no       | no        | no       |
//!
//! Under [`TransitionPolicy::Permissive`] the table is not enforced and a
//! second acceptance overwrites the first.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mp_shared::config::{TransitionPolicy, WorkflowConfig};
use mp_shared::validation;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::offer::Offer;
use crate::errors::{DomainError, DomainResult, ValidationError};

/// Currency used when none is configured
pub const DEFAULT_CURRENCY: &str = "TND";

/// Largest amount a `DECIMAL(10, 2)` price column holds: 99,999,999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Longest stored media reference, in characters
pub const MAX_MEDIA_REFERENCE_LENGTH: usize = 255;

/// Checks that a price is neither negative nor beyond [`MAX_AMOUNT`] once
/// rounded to cents
pub fn validate_amount(field: &str, amount: Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
        });
    }
    if amount.round_dp(2) > MAX_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Pending,
    Accepted,
    Completed,
    Rejected,
}

impl OrderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Pending => "pending",
            OrderState::Accepted => "accepted",
            OrderState::Completed => "completed",
            OrderState::Rejected => "rejected",
        }
    }

    /// Whether the transition table allows moving to `to`
    pub fn can_transition_to(&self, to: OrderState) -> bool {
        matches!(
            (self, to),
            (OrderState::Pending, OrderState::Accepted)
                | (OrderState::Pending, OrderState::Rejected)
                | (OrderState::Accepted, OrderState::Completed)
                | (OrderState::Accepted, OrderState::Rejected)
        )
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderState::Pending),
            "accepted" => Ok(OrderState::Accepted),
            "completed" => Ok(OrderState::Completed),
            "rejected" => Ok(OrderState::Rejected),
            other => Err(DomainError::internal(format!("Unknown order state: {}", other))),
        }
    }
}

/// Media attached to an order. `file` is the reference returned by the
/// upload layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMedia {
    pub id: Uuid,
    pub order_id: Uuid,
    pub file: String,
    pub uploaded_at: DateTime<Utc>,
}

impl OrderMedia {
    pub fn new(order_id: Uuid, file: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            file: file.into(),
            uploaded_at: Utc::now(),
        }
    }
}

/// Input for creating an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub service_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price_min: Decimal,
    pub price_max: Decimal,
    pub confirmed_provider_id: Option<Uuid>,
    pub media_files: Vec<String>,
}

impl NewOrder {
    /// Checks field lengths and the price range
    pub fn validate(&self, config: &WorkflowConfig) -> Result<(), ValidationError> {
        if !validation::not_empty(&self.title) {
            return Err(ValidationError::RequiredField {
                field: "title".to_string(),
            });
        }
        if !validation::at_most(&self.title, config.max_title_length) {
            return Err(ValidationError::TooLong {
                field: "title".to_string(),
                max: config.max_title_length,
                actual: validation::char_count(&self.title),
            });
        }
        if !validation::at_least(&self.description, config.min_description_length) {
            return Err(ValidationError::TooShort {
                field: "description".to_string(),
                min: config.min_description_length,
                actual: validation::char_count(&self.description),
            });
        }
        if !validation::at_least(&self.location, config.min_location_length) {
            return Err(ValidationError::TooShort {
                field: "location".to_string(),
                min: config.min_location_length,
                actual: validation::char_count(&self.location),
            });
        }
        if !validation::at_most(&self.location, config.max_location_length) {
            return Err(ValidationError::TooLong {
                field: "location".to_string(),
                max: config.max_location_length,
                actual: validation::char_count(&self.location),
            });
        }
        validate_amount("proposed_price_range_min", self.price_min)?;
        validate_amount("proposed_price_range_max", self.price_max)?;
        if self.price_min > self.price_max {
            return Err(ValidationError::PriceRangeInverted);
        }
        if let Some(file) = self
            .media_files
            .iter()
            .find(|file| !validation::at_most(file, MAX_MEDIA_REFERENCE_LENGTH))
        {
            return Err(ValidationError::TooLong {
                field: "media".to_string(),
                max: MAX_MEDIA_REFERENCE_LENGTH,
                actual: validation::char_count(file),
            });
        }
        Ok(())
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub client_id: Uuid,

    /// Provider the order is reserved for, or the one whose offer was accepted
    pub confirmed_provider_id: Option<Uuid>,

    pub service_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price_min: Decimal,
    pub price_max: Decimal,

    /// Starts at `price_min`, replaced by the accepted offer's price
    pub final_price: Decimal,

    pub currency: String,
    pub state: OrderState,
    pub accepted_offer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a pending order for `client_id`
    pub fn new(client_id: Uuid, request: &NewOrder, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            confirmed_provider_id: request.confirmed_provider_id,
            service_id: request.service_id,
            title: request.title.clone(),
            description: request.description.clone(),
            location: request.location.clone(),
            price_min: request.price_min,
            price_max: request.price_max,
            final_price: request.price_min,
            currency: currency.into(),
            state: OrderState::Pending,
            accepted_offer_id: None,
            created_at: Utc::now(),
        }
    }

    fn check_transition(&self, to: OrderState, policy: TransitionPolicy) -> DomainResult<()> {
        if policy.is_strict() && !self.state.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        Ok(())
    }

    /// Accepts `offer` on behalf of `provider_id`
    pub fn accept(
        &mut self,
        offer: &Offer,
        provider_id: Uuid,
        policy: TransitionPolicy,
    ) -> DomainResult<()> {
        if offer.order_id != self.id {
            return Err(ValidationError::OfferOrderMismatch.into());
        }
        self.check_transition(OrderState::Accepted, policy)?;
        if policy.is_strict() {
            if self.accepted_offer_id.is_some() {
                return Err(DomainError::InvalidTransition {
                    from: self.state,
                    to: OrderState::Accepted,
                });
            }
            if offer.provider_id != provider_id {
                return Err(ValidationError::OfferProviderMismatch.into());
            }
        }

        self.accepted_offer_id = Some(offer.id);
        self.state = OrderState::Accepted;
        self.final_price = offer.final_price();
        self.confirmed_provider_id = Some(provider_id);
        Ok(())
    }

    /// Marks the order as completed
    pub fn complete(&mut self, policy: TransitionPolicy) -> DomainResult<()> {
        self.check_transition(OrderState::Completed, policy)?;
        self.state = OrderState::Completed;
        Ok(())
    }

    /// Cancels the order (state `rejected`)
    pub fn cancel(&mut self, policy: TransitionPolicy) -> DomainResult<()> {
        self.check_transition(OrderState::Rejected, policy)?;
        self.state = OrderState::Rejected;
        Ok(())
    }

    /// Whether `provider_id` may see this order in its available list
    pub fn is_open_to(&self, provider_id: Uuid) -> bool {
        self.confirmed_provider_id.map_or(true, |p| p == provider_id)
    }
}
