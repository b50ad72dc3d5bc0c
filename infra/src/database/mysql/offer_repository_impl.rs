//! MySQL implementation of the OfferRepository trait.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use uuid::Uuid;

use mp_core::domain::entities::offer::{Offer, OrderDecline};
use mp_core::errors::{DomainError, ValidationError};
use mp_core::repositories::OfferRepository;

use super::rows::{column, is_unique_violation, parse_uuid, query_error, uuid_column};

const SELECT_COLUMNS: &str = r#"
    SELECT id, provider_id, order_id, proposed_price, description, accepted, created_at
    FROM offers
"#;

/// MySQL implementation of OfferRepository
///
/// Bids live in `offers`; decline markers in `order_declines`, which has a
/// unique key on (provider_id, order_id).
pub struct MySqlOfferRepository {
    pool: MySqlPool,
}

impl MySqlOfferRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_offer(row: &sqlx::mysql::MySqlRow) -> Result<Offer, DomainError> {
        Ok(Offer {
            id: uuid_column(row, "id")?,
            provider_id: uuid_column(row, "provider_id")?,
            order_id: uuid_column(row, "order_id")?,
            proposed_price: column::<Option<Decimal>>(row, "proposed_price")?,
            description: column(row, "description")?,
            accepted: column(row, "accepted")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }
}

#[async_trait]
impl OfferRepository for MySqlOfferRepository {
    async fn create(&self, offer: Offer) -> Result<Offer, DomainError> {
        let query = r#"
            INSERT INTO offers (
                id, provider_id, order_id, proposed_price, description, accepted, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(offer.id.to_string())
            .bind(offer.provider_id.to_string())
            .bind(offer.order_id.to_string())
            .bind(offer.proposed_price)
            .bind(&offer.description)
            .bind(offer.accepted)
            .bind(offer.created_at)
            .execute(&self.pool)
            .await
            .map_err(query_error("create offer"))?;

        Ok(offer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);
        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find offer"))?;

        result.as_ref().map(Self::row_to_offer).transpose()
    }

    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<Offer>, DomainError> {
        let query = format!("{} WHERE order_id = ? ORDER BY created_at ASC", SELECT_COLUMNS);
        let rows = sqlx::query(&query)
            .bind(order_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("list order offers"))?;

        rows.iter().map(Self::row_to_offer).collect()
    }

    async fn create_decline(&self, decline: OrderDecline) -> Result<OrderDecline, DomainError> {
        let query = r#"
            INSERT INTO order_declines (id, provider_id, order_id, created_at)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(decline.id.to_string())
            .bind(decline.provider_id.to_string())
            .bind(decline.order_id.to_string())
            .bind(decline.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::from(ValidationError::DuplicateDecline)
                } else {
                    query_error("create order decline")(e)
                }
            })?;

        Ok(decline)
    }

    async fn engaged_order_ids(&self, provider_id: Uuid) -> Result<HashSet<Uuid>, DomainError> {
        let query = r#"
            SELECT order_id FROM offers WHERE provider_id = ?
            UNION
            SELECT order_id FROM order_declines WHERE provider_id = ?
        "#;

        let ids: Vec<String> = sqlx::query_scalar(query)
            .bind(provider_id.to_string())
            .bind(provider_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("list engaged orders"))?;

        ids.iter().map(|raw| parse_uuid(raw, "order_id")).collect()
    }
}
