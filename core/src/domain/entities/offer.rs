//! Offer Book entities: provider bids and decline markers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A provider's bid against an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub order_id: Uuid,

    /// Price proposed by the provider; a bid may omit it
    pub proposed_price: Option<Decimal>,

    pub description: Option<String>,

    /// Always `true` for bids. Declines are stored as [`OrderDecline`].
    pub accepted: bool,

    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub fn new(
        provider_id: Uuid,
        order_id: Uuid,
        proposed_price: Option<Decimal>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_id,
            order_id,
            proposed_price,
            description,
            accepted: true,
            created_at: Utc::now(),
        }
    }

    /// Price that becomes the order's final price when this offer is accepted
    pub fn final_price(&self) -> Decimal {
        self.proposed_price.unwrap_or(Decimal::ZERO)
    }
}

/// A provider's "not interested" marker on an order
///
/// Unique per (provider, order). Its only effect is to hide the order from
/// that provider's available list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDecline {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub order_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl OrderDecline {
    pub fn new(provider_id: Uuid, order_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_id,
            order_id,
            created_at: Utc::now(),
        }
    }
}
