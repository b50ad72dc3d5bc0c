//! In-memory implementation of OrderRepository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderMedia, OrderState};
use crate::errors::DomainError;

use super::trait_::OrderRepository;

#[derive(Default)]
struct Ledger {
    // insertion order
    orders: Vec<Order>,
    media: Vec<OrderMedia>,
}

/// Mock order repository for testing
#[derive(Clone, Default)]
pub struct MockOrderRepository {
    ledger: Arc<RwLock<Ledger>>,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first<'a>(orders: impl DoubleEndedIterator<Item = &'a Order>) -> Vec<Order> {
        let mut list: Vec<Order> = orders.rev().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn create(&self, order: Order, media: Vec<OrderMedia>) -> Result<Order, DomainError> {
        let mut ledger = self.ledger.write().await;
        ledger.orders.push(order.clone());
        ledger.media.extend(media);
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let ledger = self.ledger.read().await;
        Ok(ledger.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let ledger = self.ledger.read().await;
        Ok(Self::newest_first(
            ledger.orders.iter().filter(|o| o.client_id == client_id),
        ))
    }

    async fn list_open_for_provider(
        &self,
        service_id: Uuid,
        provider_id: Uuid,
    ) -> Result<Vec<Order>, DomainError> {
        let ledger = self.ledger.read().await;
        Ok(Self::newest_first(ledger.orders.iter().filter(|o| {
            o.service_id == service_id && o.is_open_to(provider_id)
        })))
    }

    async fn list_media(&self, order_id: Uuid) -> Result<Vec<OrderMedia>, DomainError> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .media
            .iter()
            .filter(|m| m.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn update(&self, order: &Order) -> Result<Order, DomainError> {
        let mut ledger = self.ledger.write().await;
        let stored = ledger
            .orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or_else(|| DomainError::not_found("Order"))?;
        *stored = order.clone();
        Ok(order.clone())
    }

    async fn update_if_state(
        &self,
        order: &Order,
        expected: OrderState,
    ) -> Result<bool, DomainError> {
        let mut ledger = self.ledger.write().await;
        match ledger
            .orders
            .iter_mut()
            .find(|o| o.id == order.id && o.state == expected)
        {
            Some(stored) => {
                *stored = order.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
