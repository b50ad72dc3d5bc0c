//! Offer book service implementation

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::offer::{Offer, OrderDecline};
use crate::domain::entities::order::{validate_amount, Order};
use crate::domain::value_objects::{Actor, OfferView};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{OfferRepository, OrderRepository, ProviderRepository, UserRepository};

/// Bids and decline markers on orders
pub struct OfferService<F, O, U, P>
where
    F: OfferRepository,
    O: OrderRepository,
    U: UserRepository,
    P: ProviderRepository,
{
    offer_repository: Arc<F>,
    order_repository: Arc<O>,
    user_repository: Arc<U>,
    provider_repository: Arc<P>,
}

impl<F, O, U, P> OfferService<F, O, U, P>
where
    F: OfferRepository,
    O: OrderRepository,
    U: UserRepository,
    P: ProviderRepository,
{
    pub fn new(
        offer_repository: Arc<F>,
        order_repository: Arc<O>,
        user_repository: Arc<U>,
        provider_repository: Arc<P>,
    ) -> Self {
        Self {
            offer_repository,
            order_repository,
            user_repository,
            provider_repository,
        }
    }

    /// Place a bid on an order
    ///
    /// No category, state or duplicate checks are made here: an order a
    /// provider has bid on simply drops out of its available list.
    ///
    /// # Returns
    ///
    /// * `Ok(Offer)` - the stored bid
    /// * `Err(DomainError::NotFound)` - the order does not exist
    /// * `Err(DomainError::Validation)` - negative price, or one too large to store
    pub async fn create_offer(
        &self,
        actor: &Actor,
        order_id: Uuid,
        proposed_price: Option<Decimal>,
        description: Option<String>,
    ) -> DomainResult<Offer> {
        let provider = actor.require_provider()?;
        let order = self.find_order(order_id).await?;

        if let Some(price) = proposed_price {
            validate_amount("proposed_price", price)?;
        }

        let offer = self
            .offer_repository
            .create(Offer::new(provider.id, order.id, proposed_price, description))
            .await?;
        info!(
            offer_id = %offer.id,
            order_id = %order.id,
            provider_id = %provider.id,
            "Offer created"
        );
        Ok(offer)
    }

    /// Bids on an order in creation order, with provider display names
    pub async fn list_order_offers(&self, order_id: Uuid) -> DomainResult<Vec<OfferView>> {
        let order = self.find_order(order_id).await?;
        self.views_for_order(order.id).await
    }

    /// Decline an order without bidding on it
    ///
    /// A provider can decline an order only once.
    pub async fn reject_offer(&self, actor: &Actor, order_id: Uuid) -> DomainResult<OrderDecline> {
        let provider = actor.require_provider()?;
        let order = self.find_order(order_id).await?;

        let result = self
            .offer_repository
            .create_decline(OrderDecline::new(provider.id, order.id))
            .await;
        if let Err(DomainError::Validation(ValidationError::DuplicateDecline)) = &result {
            warn!(order_id = %order.id, provider_id = %provider.id, "Order already declined");
        }
        let decline = result?;
        info!(order_id = %order.id, provider_id = %provider.id, "Order declined");
        Ok(decline)
    }

    pub async fn find_offer(&self, offer_id: Uuid) -> DomainResult<Offer> {
        self.offer_repository
            .find_by_id(offer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Offer"))
    }

    /// Orders on which the provider has either bid or declined
    pub async fn engaged_order_ids(&self, provider_id: Uuid) -> DomainResult<HashSet<Uuid>> {
        self.offer_repository.engaged_order_ids(provider_id).await
    }

    pub async fn views_for_order(&self, order_id: Uuid) -> DomainResult<Vec<OfferView>> {
        let offers = self.offer_repository.list_by_order(order_id).await?;
        debug!(order_id = %order_id, count = offers.len(), "Listed order offers");

        let mut views = Vec::with_capacity(offers.len());
        for offer in offers {
            views.push(self.offer_view(offer).await?);
        }
        Ok(views)
    }

    /// Attach the provider's display name to an offer
    pub async fn offer_view(&self, offer: Offer) -> DomainResult<OfferView> {
        let provider_name = match self.provider_repository.find_by_id(offer.provider_id).await? {
            Some(provider) => self.user_repository.username(provider.user_id).await?,
            None => String::new(),
        };
        Ok(OfferView {
            offer,
            provider_name,
        })
    }

    async fn find_order(&self, order_id: Uuid) -> DomainResult<Order> {
        self.order_repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))
    }
}
