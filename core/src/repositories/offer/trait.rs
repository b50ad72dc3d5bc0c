//! Offer book repository trait.

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::offer::{Offer, OrderDecline};
use crate::errors::DomainError;

/// Repository trait for bids and decline markers
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn create(&self, offer: Offer) -> Result<Offer, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, DomainError>;

    /// Bids on an order in creation order
    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<Offer>, DomainError>;

    /// Record a decline marker
    ///
    /// # Returns
    /// * `Err(DomainError::Validation(DuplicateDecline))` - the provider
    ///   already declined this order
    async fn create_decline(&self, decline: OrderDecline) -> Result<OrderDecline, DomainError>;

    /// Orders on which `provider_id` has placed a bid or a decline marker
    async fn engaged_order_ids(&self, provider_id: Uuid) -> Result<HashSet<Uuid>, DomainError>;
}
