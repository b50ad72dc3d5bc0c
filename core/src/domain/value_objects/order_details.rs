//! Read models returned by the order and offer services.

use crate::domain::entities::{Offer, Order, OrderMedia};

/// An offer together with the display name of the provider that made it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferView {
    pub offer: Offer,
    pub provider_name: String,
}

/// An order expanded with everything the client and providers display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub order: Order,
    pub client_name: String,
    /// Bids in creation order. Declines are never listed.
    pub offers: Vec<OfferView>,
    pub accepted_offer: Option<OfferView>,
    pub media: Vec<OrderMedia>,
}

impl OrderDetails {
    pub fn offer(&self, offer_id: uuid::Uuid) -> Option<&OfferView> {
        self.offers.iter().find(|view| view.offer.id == offer_id)
    }
}
