//! Provider directory repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::provider::Provider;
use crate::errors::DomainError;

/// Repository trait for provider records and pending requests
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Provider>, DomainError>;

    /// The provider record owned by `user_id`, approved or not
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Provider>, DomainError>;

    async fn exists_by_cin(&self, cin: &str) -> Result<bool, DomainError>;

    /// Insert a provider record
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - the user already has a provider
    ///   record, or the cin is taken
    async fn create(&self, provider: Provider) -> Result<Provider, DomainError>;

    async fn update(&self, provider: Provider) -> Result<Provider, DomainError>;

    /// Returns `false` when no record matched
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Unapproved requests, oldest first
    async fn list_pending(&self) -> Result<Vec<Provider>, DomainError>;
}
