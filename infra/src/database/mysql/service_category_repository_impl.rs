//! MySQL implementation of the ServiceCategoryRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use uuid::Uuid;

use mp_core::domain::entities::service_category::ServiceCategory;
use mp_core::errors::DomainError;
use mp_core::repositories::ServiceCategoryRepository;

use super::rows::{column, query_error, uuid_column};

const SELECT_COLUMNS: &str = "SELECT id, name, description, created_at, updated_at FROM services";

/// MySQL implementation of ServiceCategoryRepository
pub struct MySqlServiceCategoryRepository {
    pool: MySqlPool,
}

impl MySqlServiceCategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_category(row: &sqlx::mysql::MySqlRow) -> Result<ServiceCategory, DomainError> {
        Ok(ServiceCategory {
            id: uuid_column(row, "id")?,
            name: column(row, "name")?,
            description: column(row, "description")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl ServiceCategoryRepository for MySqlServiceCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceCategory>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);
        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find service"))?;

        result.as_ref().map(Self::row_to_category).transpose()
    }

    async fn list_all(&self) -> Result<Vec<ServiceCategory>, DomainError> {
        let query = format!("{} ORDER BY name ASC", SELECT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("list services"))?;

        rows.iter().map(Self::row_to_category).collect()
    }

    async fn create(&self, category: ServiceCategory) -> Result<ServiceCategory, DomainError> {
        let query = r#"
            INSERT INTO services (id, name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(category.id.to_string())
            .bind(&category.name)
            .bind(&category.description)
            .bind(category.created_at)
            .bind(category.updated_at)
            .execute(&self.pool)
            .await
            .map_err(query_error("create service"))?;

        Ok(category)
    }
}
