//! MySQL implementation of the OrderRepository trait.
//!
//! Orders and their media are written in one transaction. State changes
//! can be guarded on the stored state (`WHERE state = ?`) so that two
//! concurrent transitions cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use uuid::Uuid;

use mp_core::domain::entities::order::{Order, OrderMedia, OrderState};
use mp_core::errors::DomainError;
use mp_core::repositories::OrderRepository;

use super::rows::{column, optional_uuid_column, query_error, uuid_column};

const SELECT_COLUMNS: &str = r#"
    SELECT id, client_id, confirmed_provider_id, service_id, title, description, location,
           accepted_offer_id, proposed_price_range_min, proposed_price_range_max,
           final_price, currency, state, created_at
    FROM orders
"#;

/// MySQL implementation of OrderRepository
pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_order(row: &sqlx::mysql::MySqlRow) -> Result<Order, DomainError> {
        let state: String = column(row, "state")?;

        Ok(Order {
            id: uuid_column(row, "id")?,
            client_id: uuid_column(row, "client_id")?,
            confirmed_provider_id: optional_uuid_column(row, "confirmed_provider_id")?,
            service_id: uuid_column(row, "service_id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            location: column(row, "location")?,
            price_min: column::<Decimal>(row, "proposed_price_range_min")?,
            price_max: column::<Decimal>(row, "proposed_price_range_max")?,
            final_price: column::<Decimal>(row, "final_price")?,
            currency: column(row, "currency")?,
            state: state.parse::<OrderState>()?,
            accepted_offer_id: optional_uuid_column(row, "accepted_offer_id")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    fn row_to_media(row: &sqlx::mysql::MySqlRow) -> Result<OrderMedia, DomainError> {
        Ok(OrderMedia {
            id: uuid_column(row, "id")?,
            order_id: uuid_column(row, "order_id")?,
            file: column(row, "file")?,
            uploaded_at: column::<DateTime<Utc>>(row, "uploaded_at")?,
        })
    }

    async fn fetch_orders(
        &self,
        filter: &str,
        binds: &[String],
        action: &'static str,
    ) -> Result<Vec<Order>, DomainError> {
        let query = format!("{} WHERE {} ORDER BY created_at DESC", SELECT_COLUMNS, filter);
        let mut statement = sqlx::query(&query);
        for value in binds {
            statement = statement.bind(value.clone());
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(query_error(action))?;

        rows.iter().map(Self::row_to_order).collect()
    }
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn create(&self, order: Order, media: Vec<OrderMedia>) -> Result<Order, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(query_error("begin order transaction"))?;

        let query = r#"
            INSERT INTO orders (
                id, client_id, confirmed_provider_id, service_id, title, description, location,
                accepted_offer_id, proposed_price_range_min, proposed_price_range_max,
                final_price, currency, state, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(order.id.to_string())
            .bind(order.client_id.to_string())
            .bind(order.confirmed_provider_id.map(|id| id.to_string()))
            .bind(order.service_id.to_string())
            .bind(&order.title)
            .bind(&order.description)
            .bind(&order.location)
            .bind(order.accepted_offer_id.map(|id| id.to_string()))
            .bind(order.price_min)
            .bind(order.price_max)
            .bind(order.final_price)
            .bind(&order.currency)
            .bind(order.state.as_str())
            .bind(order.created_at)
            .execute(&mut *tx)
            .await
            .map_err(query_error("create order"))?;

        for item in &media {
            sqlx::query(
                "INSERT INTO order_media (id, order_id, file, uploaded_at) VALUES (?, ?, ?, ?)",
            )
            .bind(item.id.to_string())
            .bind(item.order_id.to_string())
            .bind(&item.file)
            .bind(item.uploaded_at)
            .execute(&mut *tx)
            .await
            .map_err(query_error("attach order media"))?;
        }

        tx.commit()
            .await
            .map_err(query_error("commit order transaction"))?;

        tracing::debug!(order_id = %order.id, media = media.len(), "Order row inserted");
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);
        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find order"))?;

        result.as_ref().map(Self::row_to_order).transpose()
    }

    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Order>, DomainError> {
        self.fetch_orders("client_id = ?", &[client_id.to_string()], "list client orders")
            .await
    }

    async fn list_open_for_provider(
        &self,
        service_id: Uuid,
        provider_id: Uuid,
    ) -> Result<Vec<Order>, DomainError> {
        self.fetch_orders(
            "service_id = ? AND (confirmed_provider_id IS NULL OR confirmed_provider_id = ?)",
            &[service_id.to_string(), provider_id.to_string()],
            "list open orders",
        )
        .await
    }

    async fn list_media(&self, order_id: Uuid) -> Result<Vec<OrderMedia>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, order_id, file, uploaded_at FROM order_media WHERE order_id = ? ORDER BY uploaded_at ASC",
        )
        .bind(order_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(query_error("list order media"))?;

        rows.iter().map(Self::row_to_media).collect()
    }

    async fn update(&self, order: &Order) -> Result<Order, DomainError> {
        let query = r#"
            UPDATE orders
            SET confirmed_provider_id = ?, accepted_offer_id = ?, final_price = ?, state = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(order.confirmed_provider_id.map(|id| id.to_string()))
            .bind(order.accepted_offer_id.map(|id| id.to_string()))
            .bind(order.final_price)
            .bind(order.state.as_str())
            .bind(order.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error("update order"))?;

        // MySQL reports 0 affected rows when nothing changed
        if result.rows_affected() == 0 && self.find_by_id(order.id).await?.is_none() {
            return Err(DomainError::not_found("Order"));
        }

        Ok(order.clone())
    }

    async fn update_if_state(
        &self,
        order: &Order,
        expected: OrderState,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE orders
            SET confirmed_provider_id = ?, accepted_offer_id = ?, final_price = ?, state = ?
            WHERE id = ? AND state = ?
        "#;

        let result = sqlx::query(query)
            .bind(order.confirmed_provider_id.map(|id| id.to_string()))
            .bind(order.accepted_offer_id.map(|id| id.to_string()))
            .bind(order.final_price)
            .bind(order.state.as_str())
            .bind(order.id.to_string())
            .bind(expected.as_str())
            .execute(&self.pool)
            .await
            .map_err(query_error("update order state"))?;

        Ok(result.rows_affected() == 1)
    }
}
