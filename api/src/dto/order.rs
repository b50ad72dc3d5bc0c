use chrono::{DateTime, Utc};
use mp_core::domain::entities::{NewOrder, OrderMedia, OrderState};
use mp_core::domain::value_objects::OrderDetails;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{money, OfferResponse};

/// Body of `POST /create_order`
///
/// Field lengths and the price range are checked by the order service;
/// this only bounds the attachment list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub service_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub proposed_price_range_min: Decimal,
    pub proposed_price_range_max: Decimal,

    /// Provider the order is reserved for
    #[serde(default, alias = "Confirmed_provider")]
    pub confirmed_provider: Option<Uuid>,

    /// References to already uploaded files
    #[serde(default)]
    #[validate(length(max = 10))]
    pub media: Vec<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            service_id: request.service_id,
            title: request.title,
            description: request.description,
            location: request.location,
            price_min: request.proposed_price_range_min,
            price_max: request.proposed_price_range_max,
            confirmed_provider_id: request.confirmed_provider,
            media_files: request.media,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptOfferRequest {
    pub order_id: Uuid,
    pub offer_id: Uuid,
}

/// Body of `complete_order` and `cancel_order`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderActionRequest {
    pub order_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaResponse {
    pub id: Uuid,
    pub order: Uuid,
    pub file: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<OrderMedia> for MediaResponse {
    fn from(media: OrderMedia) -> Self {
        Self {
            id: media.id,
            order: media.order_id,
            file: media.file,
            uploaded_at: media.uploaded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub client: Uuid,
    pub client_name: String,
    pub confirmed_provider: Option<Uuid>,
    pub service: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub proposed_price_range_min: Decimal,
    pub proposed_price_range_max: Decimal,
    pub final_price: Decimal,
    pub currency: String,
    pub state: OrderState,
    pub accepted_offer: Option<OfferResponse>,
    pub offers: Vec<OfferResponse>,
    pub media: Vec<MediaResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderDetails> for OrderResponse {
    fn from(details: OrderDetails) -> Self {
        let order = details.order;
        Self {
            id: order.id,
            client: order.client_id,
            client_name: details.client_name,
            confirmed_provider: order.confirmed_provider_id,
            service: order.service_id,
            title: order.title,
            description: order.description,
            location: order.location,
            proposed_price_range_min: money(order.price_min),
            proposed_price_range_max: money(order.price_max),
            final_price: money(order.final_price),
            currency: order.currency,
            state: order.state,
            accepted_offer: details.accepted_offer.map(OfferResponse::from),
            offers: details.offers.into_iter().map(OfferResponse::from).collect(),
            media: details.media.into_iter().map(MediaResponse::from).collect(),
            created_at: order.created_at,
        }
    }
}

/// Wrapper used by `list_provider_available_orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::domain::entities::Order;
    use rust_decimal_macros::dec;

    fn request_json() -> serde_json::Value {
        serde_json::json!({
            "service_id": Uuid::new_v4(),
            "title": "Leak fix",
            "description": "Kitchen sink is leaking badly",
            "location": "Downtown Zone",
            "proposed_price_range_min": "50",
            "proposed_price_range_max": 100,
        })
    }

    #[test]
    fn test_create_order_defaults() {
        let request: CreateOrderRequest = serde_json::from_value(request_json()).unwrap();
        assert!(request.confirmed_provider.is_none());
        assert!(request.media.is_empty());
        assert!(request.validate().is_ok());

        let new_order = NewOrder::from(request);
        assert_eq!(new_order.price_min, dec!(50));
        assert_eq!(new_order.price_max, dec!(100));
    }

    #[test]
    fn test_legacy_confirmed_provider_key() {
        let provider_id = Uuid::new_v4();
        let mut json = request_json();
        json["Confirmed_provider"] = serde_json::json!(provider_id);

        let request: CreateOrderRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.confirmed_provider, Some(provider_id));
    }

    #[test]
    fn test_too_many_attachments() {
        let mut json = request_json();
        json["media"] = serde_json::json!(vec!["order_media/a.jpg"; 11]);

        let request: CreateOrderRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_order_response_shape() {
        let request: CreateOrderRequest = serde_json::from_value(request_json()).unwrap();
        let new_order = NewOrder::from(request);
        let order = Order::new(Uuid::new_v4(), &new_order, "TND");
        let details = OrderDetails {
            order,
            client_name: "alice".to_string(),
            offers: vec![],
            accepted_offer: None,
            media: vec![],
        };

        let json = serde_json::to_value(OrderResponse::from(details)).unwrap();
        assert_eq!(json["state"], "pending");
        assert_eq!(json["final_price"], "50.00");
        assert_eq!(json["proposed_price_range_max"], "100.00");
        assert_eq!(json["client_name"], "alice");
        assert!(json["accepted_offer"].is_null());
        assert!(json["confirmed_provider"].is_null());
    }
}
