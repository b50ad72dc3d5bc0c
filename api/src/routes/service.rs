//! Handlers under `/api/v1/service`: orders, offers and the catalog.
//!
//! Every handler resolves the caller's [`Actor`](mp_core::Actor) from the
//! token first; role checks happen in the services.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use mp_core::repositories::{
    OfferRepository, OrderRepository, ProviderRepository, ServiceCategoryRepository,
    UserRepository,
};

use crate::dto::{
    AcceptOfferRequest, CreateOfferRequest, CreateOrderRequest, CreateServiceRequest,
    DeclineResponse, OfferResponse, OffersResponse, OrderActionRequest, OrderResponse,
    OrdersResponse, RejectOfferRequest, ServiceResponse,
};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::AppState;

type State<O, F, U, P, C> = web::Data<AppState<O, F, U, P, C>>;

/// Handler for POST /api/v1/service/create_order
///
/// Creates a pending order for the caller. Responds 201 with the order
/// details; 404 when the service or the confirmed provider is unknown.
pub async fn create_order<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
    request: web::Json<CreateOrderRequest>,
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
    let details = state.order_service.create_order(&actor, request.into()).await?;

    log::info!("Order {} created by {}", details.order.id, actor.user_id());
    Ok(HttpResponse::Created().json(OrderResponse::from(details)))
}

/// Handler for GET /api/v1/service/list_order_offers/{order_id}
pub async fn list_order_offers<O, F, U, P, C>(
    _auth: AuthContext,
    state: State<O, F, U, P, C>,
    order_id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let offers = state
        .offer_service
        .list_order_offers(order_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(OffersResponse {
        offers: offers.into_iter().map(OfferResponse::from).collect(),
    }))
}

/// Handler for GET /api/v1/service/list_service
pub async fn list_service<O, F, U, P, C>(
    _auth: AuthContext,
    state: State<O, F, U, P, C>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let services = state.catalog_service.list_service().await?;
    let body: Vec<ServiceResponse> = services.into_iter().map(ServiceResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Handler for POST /api/v1/service/create_service (administrators)
pub async fn create_service<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
    request: web::Json<CreateServiceRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    request.validate()?;

    let actor = state.actor(auth).await?;
    let category = state
        .catalog_service
        .create_service(&actor, &request.name, &request.description)
        .await?;

    Ok(HttpResponse::Created().json(ServiceResponse::from(category)))
}

/// Handler for GET /api/v1/service/list_orders
///
/// The caller's own orders, newest first.
pub async fn list_orders<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let actor = state.actor(auth).await?;
    let orders = state.order_service.list_client_orders(&actor).await?;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Handler for POST /api/v1/service/accept_offer
///
/// 409 when the order can no longer be accepted under the configured
/// transition policy.
pub async fn accept_offer<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
    request: web::Json<AcceptOfferRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let actor = state.actor(auth).await?;
    let details = state
        .order_service
        .accept_offer(&actor, request.order_id, request.offer_id)
        .await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(details)))
}

/// Handler for POST /api/v1/service/reject_offer
///
/// Records that the calling provider declines the order. Responds 201 with
/// the decline rendered as an unaccepted offer.
pub async fn reject_offer<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
    request: web::Json<RejectOfferRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let actor = state.actor(auth).await?;
    let decline = state
        .offer_service
        .reject_offer(&actor, request.order_id)
        .await?;

    Ok(HttpResponse::Created().json(DeclineResponse::from(decline)))
}

/// Handler for POST /api/v1/service/complete_order
pub async fn complete_order<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
    request: web::Json<OrderActionRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let actor = state.actor(auth).await?;
    let details = state
        .order_service
        .complete_order(&actor, request.order_id)
        .await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(details)))
}

/// Handler for POST /api/v1/service/cancel_order
pub async fn cancel_order<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
    request: web::Json<OrderActionRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let actor = state.actor(auth).await?;
    let details = state
        .order_service
        .cancel_order(&actor, request.order_id)
        .await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(details)))
}

/// Handler for GET /api/v1/service/list_provider_available_orders
///
/// Orders in the caller's category that are open to it and that it has
/// neither bid on nor declined.
pub async fn list_provider_available_orders<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let actor = state.actor(auth).await?;
    let orders = state
        .order_service
        .list_provider_available_orders(&actor)
        .await?;

    Ok(HttpResponse::Ok().json(OrdersResponse {
        orders: orders.into_iter().map(OrderResponse::from).collect(),
    }))
}

/// Handler for POST /api/v1/service/create_offer
pub async fn create_offer<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
    request: web::Json<CreateOfferRequest>,
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
    let offer = state
        .offer_service
        .create_offer(
            &actor,
            request.order_id,
            request.proposed_price,
            request.description,
        )
        .await?;
    let view = state.offer_service.offer_view(offer).await?;

    Ok(HttpResponse::Created().json(OfferResponse::from(view)))
}

/// Handler for GET /api/v1/service/order/{order_id}
///
/// Open to any approved provider.
pub async fn get_order<O, F, U, P, C>(
    auth: AuthContext,
    state: State<O, F, U, P, C>,
    order_id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    let actor = state.actor(auth).await?;
    let details = state
        .order_service
        .get_order(&actor, order_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(details)))
}

/// Register the service routes on `cfg`
pub fn configure<O, F, U, P, C>(cfg: &mut web::ServiceConfig)
where
    O: OrderRepository + 'static,
    F: OfferRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    C: ServiceCategoryRepository + 'static,
{
    cfg.route("/create_order", web::post().to(create_order::<O, F, U, P, C>))
        .route(
            "/list_order_offers/{order_id}",
            web::get().to(list_order_offers::<O, F, U, P, C>),
        )
        .route("/list_service", web::get().to(list_service::<O, F, U, P, C>))
        .route("/create_service", web::post().to(create_service::<O, F, U, P, C>))
        .route("/list_orders", web::get().to(list_orders::<O, F, U, P, C>))
        .route("/accept_offer", web::post().to(accept_offer::<O, F, U, P, C>))
        .route("/reject_offer", web::post().to(reject_offer::<O, F, U, P, C>))
        .route("/complete_order", web::post().to(complete_order::<O, F, U, P, C>))
        .route("/cancel_order", web::post().to(cancel_order::<O, F, U, P, C>))
        .route(
            "/list_provider_available_orders",
            web::get().to(list_provider_available_orders::<O, F, U, P, C>),
        )
        .route("/create_offer", web::post().to(create_offer::<O, F, U, P, C>))
        .route("/order/{order_id}", web::get().to(get_order::<O, F, U, P, C>));
}
