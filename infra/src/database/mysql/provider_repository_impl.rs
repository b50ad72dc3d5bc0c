//! MySQL implementation of the ProviderRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use uuid::Uuid;

use mp_core::domain::entities::provider::Provider;
use mp_core::errors::{DomainError, ValidationError};
use mp_core::repositories::ProviderRepository;

use super::rows::{column, is_unique_violation, query_error, uuid_column};

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, cin, service_id, location, proof_document, is_approved, created_at
    FROM providers
"#;

/// MySQL implementation of ProviderRepository
pub struct MySqlProviderRepository {
    pool: MySqlPool,
}

impl MySqlProviderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_provider(row: &sqlx::mysql::MySqlRow) -> Result<Provider, DomainError> {
        Ok(Provider {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            cin: column(row, "cin")?,
            service_id: uuid_column(row, "service_id")?,
            location: column(row, "location")?,
            proof_document: column(row, "proof_document")?,
            is_approved: column(row, "is_approved")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<Provider>, DomainError> {
        let query = format!("{} WHERE {} = ? LIMIT 1", SELECT_COLUMNS, filter);
        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find provider"))?;

        result.as_ref().map(Self::row_to_provider).transpose()
    }
}

#[async_trait]
impl ProviderRepository for MySqlProviderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Provider>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Provider>, DomainError> {
        self.find_one("user_id", user_id.to_string()).await
    }

    async fn exists_by_cin(&self, cin: &str) -> Result<bool, DomainError> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM providers WHERE cin = ?)")
                .bind(cin)
                .fetch_one(&self.pool)
                .await
                .map_err(query_error("check provider cin"))?;
        Ok(exists == 1)
    }

    async fn create(&self, provider: Provider) -> Result<Provider, DomainError> {
        let query = r#"
            INSERT INTO providers (
                id, user_id, cin, service_id, location, proof_document, is_approved, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(provider.id.to_string())
            .bind(provider.user_id.to_string())
            .bind(&provider.cin)
            .bind(provider.service_id.to_string())
            .bind(&provider.location)
            .bind(&provider.proof_document)
            .bind(provider.is_approved)
            .bind(provider.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::from(ValidationError::DuplicateValue {
                        field: "provider".to_string(),
                    })
                } else {
                    query_error("create provider")(e)
                }
            })?;

        Ok(provider)
    }

    async fn update(&self, provider: Provider) -> Result<Provider, DomainError> {
        let query = r#"
            UPDATE providers
            SET cin = ?, service_id = ?, location = ?, proof_document = ?, is_approved = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&provider.cin)
            .bind(provider.service_id.to_string())
            .bind(&provider.location)
            .bind(&provider.proof_document)
            .bind(provider.is_approved)
            .bind(provider.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error("update provider"))?;

        if result.rows_affected() == 0 && self.find_by_id(provider.id).await?.is_none() {
            return Err(DomainError::not_found("Provider"));
        }

        Ok(provider)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM providers WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error("delete provider"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_pending(&self) -> Result<Vec<Provider>, DomainError> {
        let query = format!("{} WHERE is_approved = FALSE ORDER BY created_at ASC", SELECT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("list pending providers"))?;

        rows.iter().map(Self::row_to_provider).collect()
    }
}
