//! Catalog service implementation

use std::sync::Arc;

use mp_shared::validation;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::service_category::{ServiceCategory, MAX_NAME_LENGTH};
use crate::domain::value_objects::Actor;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::ServiceCategoryRepository;

/// Read-mostly access to service categories
pub struct CatalogService<C>
where
    C: ServiceCategoryRepository,
{
    catalog_repository: Arc<C>,
}

impl<C> CatalogService<C>
where
    C: ServiceCategoryRepository,
{
    pub fn new(catalog_repository: Arc<C>) -> Self {
        Self { catalog_repository }
    }

    /// All categories, ordered by name
    pub async fn list_service(&self) -> DomainResult<Vec<ServiceCategory>> {
        let categories = self.catalog_repository.list_all().await?;
        debug!(count = categories.len(), "Listed service categories");
        Ok(categories)
    }

    pub async fn get_service(&self, id: Uuid) -> DomainResult<ServiceCategory> {
        self.catalog_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service"))
    }

    /// Create a category (administrators only)
    pub async fn create_service(
        &self,
        actor: &Actor,
        name: &str,
        description: &str,
    ) -> DomainResult<ServiceCategory> {
        actor.require_admin()?;

        let name = name.trim();
        if !validation::not_empty(name) {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }
        if !validation::at_most(name, MAX_NAME_LENGTH) {
            return Err(ValidationError::TooLong {
                field: "name".to_string(),
                max: MAX_NAME_LENGTH,
                actual: validation::char_count(name),
            }
            .into());
        }

        let category = self
            .catalog_repository
            .create(ServiceCategory::new(name, description))
            .await?;
        info!(service_id = %category.id, name = %category.name, "Service category created");
        Ok(category)
    }
}
