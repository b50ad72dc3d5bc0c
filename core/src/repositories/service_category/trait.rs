//! Catalog repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::service_category::ServiceCategory;
use crate::errors::DomainError;

/// Repository trait for service categories
#[async_trait]
pub trait ServiceCategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceCategory>, DomainError>;

    /// All categories ordered by name
    async fn list_all(&self) -> Result<Vec<ServiceCategory>, DomainError>;

    async fn create(&self, category: ServiceCategory) -> Result<ServiceCategory, DomainError>;
}
