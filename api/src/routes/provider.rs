//! Handlers under `/api/v1/provider`: becoming a provider and the
//! administrator review of pending requests.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use mp_core::repositories::{
    OfferRepository, OrderRepository, ProviderRepository, ServiceCategoryRepository,
    UserRepository,
};

use crate::dto::{CreateProviderRequest, MessageResponse, ProviderResponse, ReviewRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/provider/create
///
/// Submits an unapproved provider request for the caller.
pub async fn create_provider_request<O, F, U, P, C>(
    auth: AuthContext,
    state: web::Data<AppState<O, F, U, P, C>>,
    request: web::Json<CreateProviderRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let actor = state.actor(auth).await?;
    let provider = state
        .provider_service
        .submit_request(&actor, request.into())
        .await?;

    log::info!("Provider request {} submitted by {}", provider.id, actor.user_id());
    Ok(HttpResponse::Created().json(MessageResponse::new("Request submitted successfully.")))
}

/// Handler for GET /api/v1/provider/requests (administrators)
pub async fn list_provider_requests<O, F, U, P, C>(
    auth: AuthContext,
    state: web::Data<AppState<O, F, U, P, C>>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let actor = state.actor(auth).await?;
    let pending = state.provider_service.list_pending_requests(&actor).await?;

    let body: Vec<ProviderResponse> = pending.into_iter().map(ProviderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Handler for PATCH /api/v1/provider/approve/{provider_id} (administrators)
///
/// `{"action": "approve"}` approves the request, `{"action": "reject"}`
/// deletes it. Any other action is a 400.
pub async fn review_provider_request<O, F, U, P, C>(
    auth: AuthContext,
    state: web::Data<AppState<O, F, U, P, C>>,
    provider_id: web::Path<Uuid>,
    request: web::Json<ReviewRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let actor = state.actor(auth).await?;
    let outcome = state
        .provider_service
        .review_request(&actor, provider_id.into_inner(), &request.action)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(outcome.message())))
}

/// Register the provider routes on `cfg`
pub fn configure<O, F, U, P, C>(cfg: &mut web::ServiceConfig)
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    cfg.route("/create", web::post().to(create_provider_request::<O, F, U, P, C>))
        .route("/requests", web::get().to(list_provider_requests::<O, F, U, P, C>))
        .route(
            "/approve/{provider_id}",
            web::patch().to(review_provider_request::<O, F, U, P, C>),
        );
}
