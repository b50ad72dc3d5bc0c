use chrono::{DateTime, Utc};
use mp_core::domain::entities::OrderDecline;
use mp_core::domain::value_objects::OfferView;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::money;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOfferRequest {
    pub order_id: Uuid,

    /// Omitted price is accepted as a bid of 0
    pub proposed_price: Option<Decimal>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectOfferRequest {
    pub order_id: Uuid,
}

/// A bid as clients see it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferResponse {
    pub id: Uuid,
    pub provider: Uuid,
    pub provider_name: String,
    pub order: Uuid,
    pub proposed_price: Option<Decimal>,
    pub description: Option<String>,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<OfferView> for OfferResponse {
    fn from(view: OfferView) -> Self {
        let offer = view.offer;
        Self {
            id: offer.id,
            provider: offer.provider_id,
            provider_name: view.provider_name,
            order: offer.order_id,
            proposed_price: offer.proposed_price.map(money),
            description: offer.description,
            accepted: offer.accepted,
            created_at: offer.created_at,
        }
    }
}

/// A decline marker, rendered in the shape of an offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclineResponse {
    pub id: Uuid,
    pub provider: Uuid,
    pub order: Uuid,
    pub proposed_price: Option<Decimal>,
    pub description: Option<String>,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<OrderDecline> for DeclineResponse {
    fn from(decline: OrderDecline) -> Self {
        Self {
            id: decline.id,
            provider: decline.provider_id,
            order: decline.order_id,
            proposed_price: None,
            description: None,
            accepted: false,
            created_at: decline.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffersResponse {
    pub offers: Vec<OfferResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::domain::entities::Offer;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decline_renders_as_unaccepted_offer() {
        let decline = OrderDecline::new(Uuid::new_v4(), Uuid::new_v4());
        let json = serde_json::to_value(DeclineResponse::from(decline.clone())).unwrap();

        assert_eq!(json["accepted"], false);
        assert!(json["proposed_price"].is_null());
        assert!(json["description"].is_null());
        assert_eq!(json["provider"], decline.provider_id.to_string());
        assert_eq!(json["order"], decline.order_id.to_string());
    }

    #[test]
    fn test_offer_price_is_a_decimal_string() {
        let offer = Offer::new(Uuid::new_v4(), Uuid::new_v4(), Some(dec!(80)), None);
        let view = OfferView {
            offer,
            provider_name: "pro".to_string(),
        };
        let json = serde_json::to_value(OfferResponse::from(view)).unwrap();

        assert_eq!(json["proposed_price"], "80.00");
        assert_eq!(json["provider_name"], "pro");
        assert_eq!(json["accepted"], true);
    }

    #[test]
    fn test_create_offer_accepts_numeric_price() {
        let order_id = Uuid::new_v4();
        let request: CreateOfferRequest = serde_json::from_value(serde_json::json!({
            "order_id": order_id,
            "proposed_price": 80.5,
        }))
        .unwrap();

        assert_eq!(request.proposed_price, Some(dec!(80.5)));
        assert!(request.description.is_none());
    }
}
