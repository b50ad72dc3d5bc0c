//! Order ledger service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::order::{NewOrder, Order, OrderMedia, OrderState};
use crate::domain::value_objects::{Actor, OrderDetails};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    OfferRepository, OrderRepository, ProviderRepository, ServiceCategoryRepository,
    UserRepository,
};
use crate::services::offer::OfferService;

use super::config::OrderServiceConfig;

/// Order lifecycle and provider matching
pub struct OrderService<O, F, U, P, C>
where
    O: OrderRepository,
    F: OfferRepository,
    U: UserRepository,
    P: ProviderRepository,
    C: ServiceCategoryRepository,
{
    /// Order ledger persistence
    order_repository: Arc<O>,
    /// Catalog lookups for new orders
    catalog_repository: Arc<C>,
    /// Provider lookups for reserved orders
    provider_repository: Arc<P>,
    /// Client display names
    user_repository: Arc<U>,
    /// Offer book, for acceptance and offer listings
    offer_service: Arc<OfferService<F, O, U, P>>,
    config: OrderServiceConfig,
}

impl<O, F, U, P, C> OrderService<O, F, U, P, C>
where
    O: OrderRepository,
    F: OfferRepository,
    U: UserRepository,
    P: ProviderRepository,
    C: ServiceCategoryRepository,
{
    pub fn new(
        order_repository: Arc<O>,
        catalog_repository: Arc<C>,
        provider_repository: Arc<P>,
        user_repository: Arc<U>,
        offer_service: Arc<OfferService<F, O, U, P>>,
        config: OrderServiceConfig,
    ) -> Self {
        Self {
            order_repository,
            catalog_repository,
            provider_repository,
            user_repository,
            offer_service,
            config,
        }
    }

    /// Create a pending order for the calling client
    ///
    /// The order starts with `final_price == price_min` and its media are
    /// stored in the same write as the order.
    ///
    /// # Returns
    ///
    /// * `Ok(OrderDetails)` - the new order with no offers
    /// * `Err(DomainError::NotFound)` - unknown service or confirmed provider
    /// * `Err(DomainError::Validation)` - field lengths or price range
    pub async fn create_order(&self, actor: &Actor, request: NewOrder) -> DomainResult<OrderDetails> {
        if self
            .catalog_repository
            .find_by_id(request.service_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Service"));
        }

        if let Err(e) = request.validate(&self.config.workflow) {
            warn!(client_id = %actor.user_id(), error = %e, "Order rejected by validation");
            return Err(e.into());
        }

        if let Some(provider_id) = request.confirmed_provider_id {
            if self.provider_repository.find_by_id(provider_id).await?.is_none() {
                return Err(DomainError::not_found("Provider"));
            }
        }

        let order = Order::new(
            actor.user_id(),
            &request,
            self.config.workflow.default_currency.as_str(),
        );
        let media = request
            .media_files
            .iter()
            .map(|file| OrderMedia::new(order.id, file.as_str()))
            .collect();

        let order = self.order_repository.create(order, media).await?;
        info!(
            order_id = %order.id,
            client_id = %order.client_id,
            service_id = %order.service_id,
            media = request.media_files.len(),
            "Order created"
        );
        self.details(order).await
    }

    /// The calling client's orders, newest first
    pub async fn list_client_orders(&self, actor: &Actor) -> DomainResult<Vec<OrderDetails>> {
        let orders = self.order_repository.list_by_client(actor.user_id()).await?;
        debug!(client_id = %actor.user_id(), count = orders.len(), "Listed client orders");
        self.details_all(orders).await
    }

    /// Orders the calling provider can still bid on, newest first
    ///
    /// Only orders in the provider's category that are unreserved or
    /// reserved for this provider, minus every order the provider has
    /// already bid on or declined.
    pub async fn list_provider_available_orders(
        &self,
        actor: &Actor,
    ) -> DomainResult<Vec<OrderDetails>> {
        let provider = actor.require_provider()?;

        let candidates = self
            .order_repository
            .list_open_for_provider(provider.service_id, provider.id)
            .await?;
        let engaged = self.offer_service.engaged_order_ids(provider.id).await?;
        let available: Vec<Order> = candidates
            .into_iter()
            .filter(|order| !engaged.contains(&order.id))
            .collect();

        debug!(
            provider_id = %provider.id,
            count = available.len(),
            "Listed available orders"
        );
        self.details_all(available).await
    }

    /// Fetch one order. Any approved provider may read any order.
    pub async fn get_order(&self, actor: &Actor, order_id: Uuid) -> DomainResult<OrderDetails> {
        actor.require_provider()?;
        let order = self.find_order(order_id).await?;
        self.details(order).await
    }

    /// Accept an offer on behalf of the calling provider
    ///
    /// Sets the accepted offer, the final price, the confirmed provider and
    /// the `accepted` state in a single row update.
    pub async fn accept_offer(
        &self,
        actor: &Actor,
        order_id: Uuid,
        offer_id: Uuid,
    ) -> DomainResult<OrderDetails> {
        let provider = actor.require_provider()?;
        let mut order = self.find_order(order_id).await?;
        let offer = self.offer_service.find_offer(offer_id).await?;

        let previous = order.state;
        if let Err(e) = order.accept(&offer, provider.id, self.config.policy()) {
            warn!(
                order_id = %order_id,
                offer_id = %offer_id,
                provider_id = %provider.id,
                error = %e,
                "Offer acceptance refused"
            );
            return Err(e);
        }
        let order = self.persist(order, previous).await?;

        info!(
            order_id = %order.id,
            offer_id = %offer.id,
            provider_id = %provider.id,
            final_price = %order.final_price,
            "Offer accepted"
        );
        self.details(order).await
    }

    /// Mark an order as completed
    pub async fn complete_order(&self, actor: &Actor, order_id: Uuid) -> DomainResult<OrderDetails> {
        let mut order = self.find_order(order_id).await?;
        let previous = order.state;
        order.complete(self.config.policy())?;
        let order = self.persist(order, previous).await?;

        info!(order_id = %order.id, actor = %actor.user_id(), from = %previous, "Order completed");
        self.details(order).await
    }

    /// Cancel an order (state `rejected`)
    pub async fn cancel_order(&self, actor: &Actor, order_id: Uuid) -> DomainResult<OrderDetails> {
        let mut order = self.find_order(order_id).await?;
        let previous = order.state;
        order.cancel(self.config.policy())?;
        let order = self.persist(order, previous).await?;

        info!(order_id = %order.id, actor = %actor.user_id(), from = %previous, "Order cancelled");
        self.details(order).await
    }

    /// Write a transitioned order back
    ///
    /// Under the strict policy the write only applies if the stored state is
    /// still `previous`; losing that race is an invalid transition.
    async fn persist(&self, order: Order, previous: OrderState) -> DomainResult<Order> {
        if !self.config.policy().is_strict() {
            return self.order_repository.update(&order).await;
        }

        if self.order_repository.update_if_state(&order, previous).await? {
            return Ok(order);
        }

        let current = self.find_order(order.id).await?;
        warn!(
            order_id = %order.id,
            expected = %previous,
            found = %current.state,
            "Concurrent order transition"
        );
        Err(DomainError::InvalidTransition {
            from: current.state,
            to: order.state,
        })
    }

    async fn find_order(&self, order_id: Uuid) -> DomainResult<Order> {
        self.order_repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))
    }

    async fn details(&self, order: Order) -> DomainResult<OrderDetails> {
        let client_name = self.user_repository.username(order.client_id).await?;
        let offers = self.offer_service.views_for_order(order.id).await?;
        let accepted_offer = match order.accepted_offer_id {
            Some(offer_id) => match offers.iter().find(|view| view.offer.id == offer_id) {
                Some(view) => Some(view.clone()),
                None => {
                    let offer = self.offer_service.find_offer(offer_id).await?;
                    Some(self.offer_service.offer_view(offer).await?)
                }
            },
            None => None,
        };
        let media = self.order_repository.list_media(order.id).await?;

        Ok(OrderDetails {
            order,
            client_name,
            offers,
            accepted_offer,
            media,
        })
    }

    async fn details_all(&self, orders: Vec<Order>) -> DomainResult<Vec<OrderDetails>> {
        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.details(order).await?);
        }
        Ok(details)
    }
}
