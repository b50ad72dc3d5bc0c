//! In-memory marketplace fixture shared by the order and offer service tests

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::domain::entities::{NewOrder, NewProvider, Provider, ServiceCategory, User};
use crate::domain::value_objects::{Actor, OrderDetails};
use crate::repositories::{
    MockOfferRepository, MockOrderRepository, MockProviderRepository,
    MockServiceCategoryRepository, MockUserRepository, ProviderRepository,
    ServiceCategoryRepository, UserRepository,
};
use crate::services::offer::OfferService;
use crate::services::order::{OrderService, OrderServiceConfig};

pub type TestOfferService =
    OfferService<MockOfferRepository, MockOrderRepository, MockUserRepository, MockProviderRepository>;

pub type TestOrderService = OrderService<
    MockOrderRepository,
    MockOfferRepository,
    MockUserRepository,
    MockProviderRepository,
    MockServiceCategoryRepository,
>;

pub struct Marketplace {
    pub orders: Arc<MockOrderRepository>,
    pub offers: Arc<MockOfferRepository>,
    pub users: Arc<MockUserRepository>,
    pub providers: Arc<MockProviderRepository>,
    pub catalog: Arc<MockServiceCategoryRepository>,
    pub offer_service: Arc<TestOfferService>,
    pub order_service: TestOrderService,
    pub plumbing: ServiceCategory,
}

impl Marketplace {
    pub async fn strict() -> Self {
        Self::with_config(OrderServiceConfig::default()).await
    }

    pub async fn permissive() -> Self {
        Self::with_config(OrderServiceConfig::permissive()).await
    }

    pub async fn with_config(config: OrderServiceConfig) -> Self {
        let orders = Arc::new(MockOrderRepository::new());
        let offers = Arc::new(MockOfferRepository::new());
        let users = Arc::new(MockUserRepository::new());
        let providers = Arc::new(MockProviderRepository::new());
        let catalog = Arc::new(MockServiceCategoryRepository::new());

        let plumbing = catalog
            .create(ServiceCategory::new("Plumbing", "Pipes, leaks and water heaters"))
            .await
            .unwrap();

        let offer_service = Arc::new(OfferService::new(
            offers.clone(),
            orders.clone(),
            users.clone(),
            providers.clone(),
        ));
        let order_service = OrderService::new(
            orders.clone(),
            catalog.clone(),
            providers.clone(),
            users.clone(),
            offer_service.clone(),
            config,
        );

        Self {
            orders,
            offers,
            users,
            providers,
            catalog,
            offer_service,
            order_service,
            plumbing,
        }
    }

    pub async fn client(&self, name: &str) -> Actor {
        let user = self.users.create(User::new(name)).await.unwrap();
        Actor::resolve(user, None)
    }

    /// An approved provider in the plumbing category
    pub async fn provider(&self, name: &str) -> Actor {
        self.provider_in(name, self.plumbing.id, true).await
    }

    pub async fn provider_in(&self, name: &str, service_id: Uuid, approved: bool) -> Actor {
        let user = self.users.create(User::new(name)).await.unwrap();
        let mut provider = Provider::new(
            user.id,
            NewProvider {
                service_id,
                cin: None,
                location: "Tunis".to_string(),
                proof_document: format!("proofs/{}.pdf", name),
            },
        );
        if approved {
            provider.approve();
        }
        let provider = self.providers.create(provider).await.unwrap();
        Actor::resolve(user, Some(provider))
    }

    pub fn leak_fix(&self) -> NewOrder {
        NewOrder {
            service_id: self.plumbing.id,
            title: "Leak fix".to_string(),
            description: "Kitchen sink is leaking badly".to_string(),
            location: "Downtown Zone".to_string(),
            price_min: dec!(50),
            price_max: dec!(100),
            confirmed_provider_id: None,
            media_files: Vec::new(),
        }
    }

    pub async fn order(&self, client: &Actor) -> OrderDetails {
        self.order_service
            .create_order(client, self.leak_fix())
            .await
            .unwrap()
    }
}

/// Provider id behind an actor
pub fn provider_id(actor: &Actor) -> Uuid {
    actor.provider().map(|p| p.id).unwrap()
}
