//! Provider directory service implementation

use std::sync::Arc;

use mp_shared::validation;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::provider::{NewProvider, Provider};
use crate::domain::value_objects::{Actor, ReviewAction, ReviewOutcome};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{ProviderRepository, ServiceCategoryRepository, UserRepository};

use super::config::ProviderServiceConfig;

/// Provider directory and role resolution
pub struct ProviderService<P, U, C>
where
    P: ProviderRepository,
    U: UserRepository,
    C: ServiceCategoryRepository,
{
    provider_repository: Arc<P>,
    user_repository: Arc<U>,
    catalog_repository: Arc<C>,
    config: ProviderServiceConfig,
}

impl<P, U, C> ProviderService<P, U, C>
where
    P: ProviderRepository,
    U: UserRepository,
    C: ServiceCategoryRepository,
{
    pub fn new(
        provider_repository: Arc<P>,
        user_repository: Arc<U>,
        catalog_repository: Arc<C>,
        config: ProviderServiceConfig,
    ) -> Self {
        Self {
            provider_repository,
            user_repository,
            catalog_repository,
            config,
        }
    }

    /// Resolve the role of an authenticated user
    ///
    /// # Returns
    ///
    /// * `Ok(Actor)` - the user's role, with its provider record when it has one
    /// * `Err(DomainError::NotFound)` - the token names a user that does not exist
    pub async fn resolve_actor(&self, user_id: Uuid) -> DomainResult<Actor> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        let provider = self.provider_repository.find_by_user_id(user_id).await?;
        Ok(Actor::resolve(user, provider))
    }

    /// Submit a request to become a provider
    ///
    /// The request is stored unapproved; one provider record per user.
    pub async fn submit_request(
        &self,
        actor: &Actor,
        mut request: NewProvider,
    ) -> DomainResult<Provider> {
        request.cin = request
            .cin
            .map(|cin| cin.trim().to_string())
            .filter(|cin| !cin.is_empty());
        self.validate_request(&request)?;

        if self
            .catalog_repository
            .find_by_id(request.service_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Service"));
        }

        if actor.provider().is_some()
            || self
                .provider_repository
                .find_by_user_id(actor.user_id())
                .await?
                .is_some()
        {
            warn!(user_id = %actor.user_id(), "Duplicate provider request");
            return Err(ValidationError::DuplicateValue {
                field: "user".to_string(),
            }
            .into());
        }

        if let Some(cin) = request.cin.as_deref() {
            if self.provider_repository.exists_by_cin(cin).await? {
                return Err(ValidationError::DuplicateValue {
                    field: "cin".to_string(),
                }
                .into());
            }
        }

        let provider = self
            .provider_repository
            .create(Provider::new(actor.user_id(), request))
            .await?;
        info!(
            provider_id = %provider.id,
            user_id = %provider.user_id,
            service_id = %provider.service_id,
            "Provider request submitted"
        );
        Ok(provider)
    }

    /// Unapproved provider requests, oldest first (administrators only)
    pub async fn list_pending_requests(&self, actor: &Actor) -> DomainResult<Vec<Provider>> {
        actor.require_admin()?;
        let pending = self.provider_repository.list_pending().await?;
        debug!(count = pending.len(), "Listed pending provider requests");
        Ok(pending)
    }

    /// Approve or reject a provider request (administrators only)
    ///
    /// `action` must be `"approve"` or `"reject"`. Rejecting deletes the
    /// request.
    pub async fn review_request(
        &self,
        actor: &Actor,
        provider_id: Uuid,
        action: &str,
    ) -> DomainResult<ReviewOutcome> {
        actor.require_admin()?;

        let mut provider = self
            .provider_repository
            .find_by_id(provider_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Provider"))?;

        match action.parse::<ReviewAction>()? {
            ReviewAction::Approve => {
                provider.approve();
                let provider = self.provider_repository.update(provider).await?;
                info!(provider_id = %provider.id, reviewer = %actor.user_id(), "Provider approved");
                Ok(ReviewOutcome::Approved(provider))
            }
            ReviewAction::Reject => {
                if !self.provider_repository.delete(provider.id).await? {
                    return Err(DomainError::not_found("Provider"));
                }
                info!(provider_id = %provider.id, reviewer = %actor.user_id(), "Provider request rejected");
                Ok(ReviewOutcome::Rejected)
            }
        }
    }

    fn validate_request(&self, request: &NewProvider) -> Result<(), ValidationError> {
        if !validation::not_empty(&request.proof_document) {
            return Err(ValidationError::RequiredField {
                field: "proof_document".to_string(),
            });
        }
        match request.cin.as_deref() {
            Some(cin) if !validation::at_most(cin, self.config.max_cin_length) => {
                Err(ValidationError::TooLong {
                    field: "cin".to_string(),
                    max: self.config.max_cin_length,
                    actual: validation::char_count(cin),
                })
            }
            None if self.config.require_cin => Err(ValidationError::RequiredField {
                field: "cin".to_string(),
            }),
            _ => Ok(()),
        }
    }
}
