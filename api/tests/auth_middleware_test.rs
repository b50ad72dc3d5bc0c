//! Bearer authentication on the API scopes and the open endpoints, including
//! dependency reporting on `/health`

mod common;

use std::sync::Arc;

use actix_web::{
    http::{header::AUTHORIZATION, StatusCode},
    test,
};
use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use common::{get, send, TestContext};
use mp_api::create_app;
use mp_api::health::HealthCheck;
use mp_api::middleware::auth::issue_token;
use mp_shared::{AuthConfig, HealthStatus, ServiceHealth};

#[actix_web::test]
async fn test_missing_token() {
    let ctx = TestContext::strict().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/service/list_service")
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[actix_web::test]
async fn test_malformed_authorization_header() {
    let ctx = TestContext::strict().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/provider/requests")
        .insert_header((AUTHORIZATION, "Token abc"))
        .to_request();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_token_signed_with_another_secret() {
    let ctx = TestContext::strict().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let (user, _) = ctx.client("alice").await;

    let forged = issue_token(
        user.id,
        &AuthConfig::new("some-other-secret"),
        Duration::minutes(5),
    )
    .unwrap();
    let (status, body) =
        send(&app, get("/api/v1/service/list_orders", &forged).to_request()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[actix_web::test]
async fn test_token_for_unknown_user() {
    let ctx = TestContext::strict().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let token = ctx.token(Uuid::new_v4());

    let (status, body) =
        send(&app, get("/api/v1/service/list_orders", &token).to_request()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[actix_web::test]
async fn test_valid_token() {
    let ctx = TestContext::strict().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let (_, token) = ctx.client("alice").await;

    let (status, body) =
        send(&app, get("/api/v1/service/list_orders", &token).to_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[actix_web::test]
async fn test_open_endpoints() {
    let ctx = TestContext::strict().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/v1/").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"]["service"]["create_order"].is_string());
}

#[actix_web::test]
async fn test_unknown_route() {
    let ctx = TestContext::strict().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let (status, body) =
        send(&app, test::TestRequest::get().uri("/api/v2/orders").to_request()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

struct FixedHealth {
    name: &'static str,
    status: HealthStatus,
}

#[async_trait]
impl HealthCheck for FixedHealth {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check(&self) -> ServiceHealth {
        ServiceHealth {
            status: self.status,
            message: None,
            response_time_ms: Some(1),
        }
    }
}

fn fixed(name: &'static str, status: HealthStatus) -> Arc<dyn HealthCheck> {
    Arc::new(FixedHealth { name, status })
}

#[actix_web::test]
async fn test_health_reports_dependencies() {
    let ctx = TestContext::with_health_checks(vec![
        fixed("database", HealthStatus::Healthy),
        fixed("cache", HealthStatus::Degraded),
    ])
    .await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["cache"]["status"], "degraded");
}

#[actix_web::test]
async fn test_health_with_unreachable_database() {
    let ctx = TestContext::with_health_checks(vec![fixed("database", HealthStatus::Unhealthy)]).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}
