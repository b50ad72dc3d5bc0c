//! Route handlers
//!
//! - `service` - orders, offers and the service catalog (`/api/v1/service`)
//! - `provider` - provider requests and their review (`/api/v1/provider`)

pub mod provider;
pub mod service;

use std::sync::Arc;

use mp_core::domain::value_objects::Actor;
use mp_core::errors::DomainError;
use mp_core::repositories::{
    OfferRepository, OrderRepository, ProviderRepository, ServiceCategoryRepository,
    UserRepository,
};
use mp_core::services::catalog::CatalogService;
use mp_core::services::offer::OfferService;
use mp_core::services::order::{OrderService, OrderServiceConfig};
use mp_core::services::provider::{ProviderService, ProviderServiceConfig};
use mp_shared::WorkflowConfig;

use crate::handlers::ApiError;
use crate::health::HealthCheck;
use crate::middleware::AuthContext;

/// Application state that holds shared services
pub struct AppState<O, F, U, P, C>
where
    O: OrderRepository,
    F: OfferRepository,
    U: UserRepository,
    P: ProviderRepository,
    C: ServiceCategoryRepository,
{
    pub catalog_service: Arc<CatalogService<C>>,
    pub provider_service: Arc<ProviderService<P, U, C>>,
    pub offer_service: Arc<OfferService<F, O, U, P>>,
    pub order_service: Arc<OrderService<O, F, U, P, C>>,
    /// Dependencies reported by `GET /health`
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl<O, F, U, P, C> AppState<O, F, U, P, C>
where
    O: OrderRepository,
    F: OfferRepository,
    U: UserRepository,
    P: ProviderRepository,
    C: ServiceCategoryRepository,
{
    /// Wire the services over one set of repositories
    pub fn new(
        orders: Arc<O>,
        offers: Arc<F>,
        users: Arc<U>,
        providers: Arc<P>,
        catalog: Arc<C>,
        workflow: WorkflowConfig,
    ) -> Self {
        let offer_service = Arc::new(OfferService::new(
            offers,
            Arc::clone(&orders),
            Arc::clone(&users),
            Arc::clone(&providers),
        ));
        let order_service = Arc::new(OrderService::new(
            orders,
            Arc::clone(&catalog),
            Arc::clone(&providers),
            Arc::clone(&users),
            Arc::clone(&offer_service),
            OrderServiceConfig::new(workflow),
        ));
        let provider_service = Arc::new(ProviderService::new(
            providers,
            users,
            Arc::clone(&catalog),
            ProviderServiceConfig::default(),
        ));

        Self {
            catalog_service: Arc::new(CatalogService::new(catalog)),
            provider_service,
            offer_service,
            order_service,
            health_checks: Vec::new(),
        }
    }

    /// Report `check` from the health endpoint
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    /// Resolve the caller's role
    ///
    /// A valid token naming an unknown user is treated as unauthenticated.
    pub async fn actor(&self, auth: AuthContext) -> Result<Actor, ApiError> {
        self.provider_service
            .resolve_actor(auth.user_id)
            .await
            .map_err(|e| {
                if e.is_not_found("User") {
                    log::warn!("Token names unknown user {}", auth.user_id);
                    ApiError::from(DomainError::Unauthorized)
                } else {
                    ApiError::from(e)
                }
            })
    }
}
