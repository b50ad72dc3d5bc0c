//! In-memory implementation of OfferRepository

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::offer::{Offer, OrderDecline};
use crate::errors::{DomainError, ValidationError};

use super::trait_::OfferRepository;

#[derive(Default)]
struct Book {
    offers: Vec<Offer>,
    declines: Vec<OrderDecline>,
}

/// Mock offer repository for testing
#[derive(Clone, Default)]
pub struct MockOfferRepository {
    book: Arc<RwLock<Book>>,
}

impl MockOfferRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of decline markers recorded
    pub async fn decline_count(&self) -> usize {
        self.book.read().await.declines.len()
    }
}

#[async_trait]
impl OfferRepository for MockOfferRepository {
    async fn create(&self, offer: Offer) -> Result<Offer, DomainError> {
        let mut book = self.book.write().await;
        book.offers.push(offer.clone());
        Ok(offer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, DomainError> {
        let book = self.book.read().await;
        Ok(book.offers.iter().find(|o| o.id == id).cloned())
    }

    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<Offer>, DomainError> {
        let book = self.book.read().await;
        Ok(book
            .offers
            .iter()
            .filter(|o| o.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn create_decline(&self, decline: OrderDecline) -> Result<OrderDecline, DomainError> {
        let mut book = self.book.write().await;

        if book
            .declines
            .iter()
            .any(|d| d.provider_id == decline.provider_id && d.order_id == decline.order_id)
        {
            return Err(ValidationError::DuplicateDecline.into());
        }

        book.declines.push(decline.clone());
        Ok(decline)
    }

    async fn engaged_order_ids(&self, provider_id: Uuid) -> Result<HashSet<Uuid>, DomainError> {
        let book = self.book.read().await;
        let bids = book
            .offers
            .iter()
            .filter(|o| o.provider_id == provider_id)
            .map(|o| o.order_id);
        let declines = book
            .declines
            .iter()
            .filter(|d| d.provider_id == provider_id)
            .map(|d| d.order_id);
        Ok(bids.chain(declines).collect())
    }
}
