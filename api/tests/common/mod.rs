//! Shared fixture for the API integration tests: the real application over
//! in-memory repositories, with signed tokens for seeded users.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::{to_bytes, MessageBody},
    dev::{Service, ServiceResponse},
    http::{header::AUTHORIZATION, StatusCode},
    test, web,
};
use chrono::Duration;
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use mp_api::middleware::auth::issue_token;
use mp_api::health::HealthCheck;
use mp_api::AppState;
use mp_core::domain::entities::{NewOrder, NewProvider, Provider, ServiceCategory, User};
use mp_core::repositories::{
    MockOfferRepository, MockOrderRepository, MockProviderRepository,
    MockServiceCategoryRepository, MockUserRepository, ProviderRepository,
    ServiceCategoryRepository, UserRepository,
};
use mp_shared::{AppConfig, AuthConfig, TransitionPolicy, WorkflowConfig};

pub type TestState = AppState<
    MockOrderRepository,
    MockOfferRepository,
    MockUserRepository,
    MockProviderRepository,
    MockServiceCategoryRepository,
>;

pub struct TestContext {
    pub config: AppConfig,
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub providers: Arc<MockProviderRepository>,
    pub catalog: Arc<MockServiceCategoryRepository>,
    pub plumbing: ServiceCategory,
}

impl TestContext {
    pub async fn strict() -> Self {
        Self::with_policy(TransitionPolicy::Strict).await
    }

    pub async fn permissive() -> Self {
        Self::with_policy(TransitionPolicy::Permissive).await
    }

    pub async fn with_policy(policy: TransitionPolicy) -> Self {
        Self::build(policy, Vec::new()).await
    }

    /// Strict context whose `/health` reports `checks`
    pub async fn with_health_checks(checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        Self::build(TransitionPolicy::Strict, checks).await
    }

    async fn build(policy: TransitionPolicy, checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        let config = AppConfig {
            auth: AuthConfig::new("integration-test-secret"),
            workflow: WorkflowConfig {
                policy,
                ..Default::default()
            },
            ..Default::default()
        };

        let users = Arc::new(MockUserRepository::new());
        let providers = Arc::new(MockProviderRepository::new());
        let catalog = Arc::new(MockServiceCategoryRepository::new());
        let plumbing = catalog
            .create(ServiceCategory::new("Plumbing", "Pipes, leaks and water heaters"))
            .await
            .unwrap();

        let state = checks.into_iter().fold(
            AppState::new(
                Arc::new(MockOrderRepository::new()),
                Arc::new(MockOfferRepository::new()),
                Arc::clone(&users),
                Arc::clone(&providers),
                Arc::clone(&catalog),
                config.workflow.clone(),
            ),
            |state, check| state.with_health_check(check),
        );
        let state = web::Data::new(state);

        Self {
            config,
            state,
            users,
            providers,
            catalog,
            plumbing,
        }
    }

    pub fn token(&self, user_id: Uuid) -> String {
        issue_token(user_id, &self.config.auth, Duration::minutes(15)).unwrap()
    }

    /// A plain user and its bearer token
    pub async fn client(&self, name: &str) -> (User, String) {
        let user = self.users.create(User::new(name)).await.unwrap();
        let token = self.token(user.id);
        (user, token)
    }

    pub async fn admin(&self, name: &str) -> (User, String) {
        let user = self.users.create(User::admin(name)).await.unwrap();
        let token = self.token(user.id);
        (user, token)
    }

    /// An approved plumbing provider and its bearer token
    pub async fn provider(&self, name: &str) -> (Provider, String) {
        self.provider_with(name, true).await
    }

    pub async fn provider_with(&self, name: &str, approved: bool) -> (Provider, String) {
        let user = self.users.create(User::new(name)).await.unwrap();
        let mut provider = Provider::new(
            user.id,
            NewProvider {
                service_id: self.plumbing.id,
                cin: None,
                location: "Tunis".to_string(),
                proof_document: format!("proofs/{}.pdf", name),
            },
        );
        if approved {
            provider.approve();
        }
        let provider = self.providers.create(provider).await.unwrap();
        let token = self.token(user.id);
        (provider, token)
    }

    /// A pending "Leak fix" order placed directly through the order service
    pub async fn seed_order(&self, client_id: Uuid) -> Uuid {
        let actor = self.state.provider_service.resolve_actor(client_id).await.unwrap();
        let request = NewOrder {
            service_id: self.plumbing.id,
            title: "Leak fix".to_string(),
            description: "Kitchen sink is leaking badly".to_string(),
            location: "Downtown Zone".to_string(),
            price_min: Decimal::new(50, 0),
            price_max: Decimal::new(100, 0),
            confirmed_provider_id: None,
            media_files: Vec::new(),
        };
        let details = self.state.order_service.create_order(&actor, request).await.unwrap();
        details.order.id
    }

    /// A bid from `provider` placed directly through the offer service
    pub async fn seed_offer(&self, provider: &Provider, order_id: Uuid, price: i64) -> Uuid {
        let actor = self
            .state
            .provider_service
            .resolve_actor(provider.user_id)
            .await
            .unwrap();
        let offer = self
            .state
            .offer_service
            .create_offer(&actor, order_id, Some(Decimal::new(price, 0)), None)
            .await
            .unwrap();
        offer.id
    }

    /// Body for the standard "Leak fix" order
    pub fn leak_fix(&self) -> Value {
        serde_json::json!({
            "service_id": self.plumbing.id,
            "title": "Leak fix",
            "description": "Kitchen sink is leaking badly",
            "location": "Downtown Zone",
            "proposed_price_range_min": "50",
            "proposed_price_range_max": "100",
        })
    }
}

pub fn get(uri: &str, token: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
}

pub fn post(uri: &str, token: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(body)
}

pub fn patch(uri: &str, token: &str, body: Value) -> test::TestRequest {
    test::TestRequest::patch()
        .uri(uri)
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(body)
}

/// Call the app and decode the JSON body, whether the call produced a
/// response or an error
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, bytes) = match test::try_call_service(app, req).await {
        Ok(resp) => (resp.status(), test::read_body(resp).await),
        Err(err) => {
            let resp = err.error_response();
            (resp.status(), to_bytes(resp.into_body()).await.unwrap())
        }
    };

    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
