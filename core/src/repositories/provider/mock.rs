//! In-memory implementation of ProviderRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::provider::Provider;
use crate::errors::{DomainError, ValidationError};

use super::trait_::ProviderRepository;

/// Mock provider repository for testing
#[derive(Clone)]
pub struct MockProviderRepository {
    providers: Arc<RwLock<HashMap<Uuid, Provider>>>,
}

impl MockProviderRepository {
    pub fn new() -> Self {
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockProviderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderRepository for MockProviderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Provider>, DomainError> {
        let providers = self.providers.read().await;
        Ok(providers.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Provider>, DomainError> {
        let providers = self.providers.read().await;
        Ok(providers.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn exists_by_cin(&self, cin: &str) -> Result<bool, DomainError> {
        let providers = self.providers.read().await;
        Ok(providers.values().any(|p| p.cin.as_deref() == Some(cin)))
    }

    async fn create(&self, provider: Provider) -> Result<Provider, DomainError> {
        let mut providers = self.providers.write().await;

        if providers.values().any(|p| p.user_id == provider.user_id) {
            return Err(ValidationError::DuplicateValue {
                field: "user".to_string(),
            }
            .into());
        }
        if let Some(cin) = provider.cin.as_deref() {
            if providers.values().any(|p| p.cin.as_deref() == Some(cin)) {
                return Err(ValidationError::DuplicateValue {
                    field: "cin".to_string(),
                }
                .into());
            }
        }

        providers.insert(provider.id, provider.clone());
        Ok(provider)
    }

    async fn update(&self, provider: Provider) -> Result<Provider, DomainError> {
        let mut providers = self.providers.write().await;

        if !providers.contains_key(&provider.id) {
            return Err(DomainError::not_found("Provider"));
        }

        providers.insert(provider.id, provider.clone());
        Ok(provider)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut providers = self.providers.write().await;
        Ok(providers.remove(&id).is_some())
    }

    async fn list_pending(&self) -> Result<Vec<Provider>, DomainError> {
        let providers = self.providers.read().await;
        let mut pending: Vec<Provider> = providers
            .values()
            .filter(|p| !p.is_approved)
            .cloned()
            .collect();
        pending.sort_by_key(|p| p.created_at);
        Ok(pending)
    }
}
