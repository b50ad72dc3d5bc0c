//! Order ledger repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderMedia, OrderState};
use crate::errors::DomainError;

/// Repository trait for orders and their media
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order together with its media, all or nothing
    async fn create(&self, order: Order, media: Vec<OrderMedia>) -> Result<Order, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;

    /// Orders placed by `client_id`, newest first
    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Order>, DomainError>;

    /// Orders in `service_id` that are unreserved or reserved for
    /// `provider_id`, newest first
    async fn list_open_for_provider(
        &self,
        service_id: Uuid,
        provider_id: Uuid,
    ) -> Result<Vec<Order>, DomainError>;

    async fn list_media(&self, order_id: Uuid) -> Result<Vec<OrderMedia>, DomainError>;

    /// Overwrite the mutable columns of an order
    async fn update(&self, order: &Order) -> Result<Order, DomainError>;

    /// Like [`update`](Self::update), but only when the stored state still
    /// equals `expected`
    ///
    /// # Returns
    /// * `Ok(true)` - the row was updated
    /// * `Ok(false)` - the order changed state concurrently (or is gone)
    async fn update_if_state(
        &self,
        order: &Order,
        expected: OrderState,
    ) -> Result<bool, DomainError>;
}
