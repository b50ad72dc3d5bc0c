//! In-memory implementation of ServiceCategoryRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::service_category::ServiceCategory;
use crate::errors::DomainError;

use super::trait_::ServiceCategoryRepository;

/// Mock catalog repository for testing
#[derive(Clone)]
pub struct MockServiceCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, ServiceCategory>>>,
}

impl MockServiceCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockServiceCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceCategoryRepository for MockServiceCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceCategory>, DomainError> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<ServiceCategory>, DomainError> {
        let categories = self.categories.read().await;
        let mut all: Vec<ServiceCategory> = categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn create(&self, category: ServiceCategory) -> Result<ServiceCategory, DomainError> {
        let mut categories = self.categories.write().await;
        categories.insert(category.id, category.clone());
        Ok(category)
    }
}
