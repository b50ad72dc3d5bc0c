//! Request and response bodies.
//!
//! Responses keep the field names existing clients read (`client`,
//! `service`, `provider`, `order`, `proposed_price_range_min`, ...).
//! Money is rendered as a decimal string with two fractional digits.

pub mod offer;
pub mod order;
pub mod provider;
pub mod service;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use offer::{CreateOfferRequest, DeclineResponse, OfferResponse, OffersResponse, RejectOfferRequest};
pub use order::{
    AcceptOfferRequest, CreateOrderRequest, MediaResponse, OrderActionRequest, OrderResponse,
    OrdersResponse,
};
pub use provider::{CreateProviderRequest, ProviderResponse, ReviewRequest};
pub use service::{CreateServiceRequest, ServiceResponse};

/// Body of responses that only carry a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rescale to two fractional digits
pub(crate) fn money(amount: Decimal) -> Decimal {
    let mut amount = amount;
    amount.rescale(2);
    amount
}
