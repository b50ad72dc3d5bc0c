//! Application factory
//!
//! Builds the Actix-web application: shared state, middleware, the JSON
//! extractor configuration and every route.

use std::collections::HashMap;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::Logger,
    web, App, Error, HttpResponse,
};
use mp_core::repositories::{
    OfferRepository, OrderRepository, ProviderRepository, ServiceCategoryRepository,
    UserRepository,
};
use mp_shared::{error_codes, AppConfig, ErrorResponse, HealthResponse, HealthStatus};

use crate::middleware::{create_cors, JwtAuth, SecurityMiddleware};
use crate::routes::{self, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<O, F, U, P, C>(
    app_state: web::Data<AppState<O, F, U, P, C>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let jwt = JwtAuth::new(&config.auth);

    App::new()
        .app_data(app_state)
        .app_data(json_config(config.server.max_payload_size))
        .app_data(path_config())
        // Outermost last: security, then CORS, then logging
        .wrap(Logger::default())
        .wrap(create_cors(config.environment))
        .wrap(SecurityMiddleware::for_environment(config.environment))
        .route("/health", web::get().to(health_check::<O, F, U, P, C>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/service")
                        .configure(routes::service::configure::<O, F, U, P, C>)
                        .wrap(jwt.clone()),
                )
                .service(
                    web::scope("/provider")
                        .configure(routes::provider::configure::<O, F, U, P, C>)
                        .wrap(jwt),
                )
                .route("/", web::get().to(api_documentation)),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies become 400 `validation_error` responses
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body")
                .add_detail("reason", err.to_string()),
        );
        InternalError::from_response(err, response).into()
    })
}

/// Unparseable path ids (e.g. not a UUID) are treated as unknown resources
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            "The requested resource was not found",
        ));
        InternalError::from_response(err, response).into()
    })
}

/// Health check endpoint handler
///
/// Responds 503 when any registered dependency is unhealthy.
async fn health_check<O, F, U, P, C>(state: web::Data<AppState<O, F, U, P, C>>) -> HttpResponse
where
    O: OrderRepository,
    F: OfferRepository,
    U: UserRepository,
    P: ProviderRepository,
    C: ServiceCategoryRepository,
{
    let mut services = HashMap::new();
    for check in &state.health_checks {
        let health = check.check().await;
        if health.status != HealthStatus::Healthy {
            log::warn!("Health check {} reported {:?}", check.name(), health.status);
        }
        services.insert(check.name().to_string(), health);
    }

    let response = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    if response.status == HealthStatus::Unhealthy {
        HttpResponse::ServiceUnavailable().json(response)
    } else {
        HttpResponse::Ok().json(response)
    }
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Service marketplace API v1",
        "endpoints": {
            "health": "GET /health",
            "service": {
                "create_order": "POST /api/v1/service/create_order",
                "list_order_offers": "GET /api/v1/service/list_order_offers/{order_id}",
                "list_service": "GET /api/v1/service/list_service",
                "create_service": "POST /api/v1/service/create_service",
                "list_orders": "GET /api/v1/service/list_orders",
                "accept_offer": "POST /api/v1/service/accept_offer",
                "reject_offer": "POST /api/v1/service/reject_offer",
                "complete_order": "POST /api/v1/service/complete_order",
                "cancel_order": "POST /api/v1/service/cancel_order",
                "list_provider_available_orders": "GET /api/v1/service/list_provider_available_orders",
                "create_offer": "POST /api/v1/service/create_offer",
                "order": "GET /api/v1/service/order/{order_id}"
            },
            "provider": {
                "create": "POST /api/v1/provider/create",
                "requests": "GET /api/v1/provider/requests",
                "approve": "PATCH /api/v1/provider/approve/{provider_id}"
            }
        },
        "requires_auth": "Bearer token on every /service and /provider route"
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
