//! Security headers and HTTPS enforcement.
//!
//! Outside development every response carries the standard hardening
//! headers. In production, plain HTTP requests are refused unless a proxy
//! reports `X-Forwarded-Proto: https`.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::{self, HeaderName, HeaderValue},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use mp_shared::{error_codes, Environment, ErrorResponse};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none';"),
];

/// Security middleware factory
#[derive(Debug, Clone, Copy)]
pub struct SecurityMiddleware {
    enforce_https: bool,
    add_security_headers: bool,
}

impl SecurityMiddleware {
    pub fn for_environment(environment: Environment) -> Self {
        let middleware = Self {
            enforce_https: environment.is_production(),
            add_security_headers: !environment.is_development(),
        };
        log::info!(
            "Security middleware configured: enforce_https={}, add_headers={}",
            middleware.enforce_https,
            middleware.add_security_headers
        );
        middleware
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            config: *self,
        }))
    }
}

/// Security middleware service implementation
pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    config: SecurityMiddleware,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let config = self.config;

        Box::pin(async move {
            if config.enforce_https && !is_secure_request(&req) {
                log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
                let response = HttpResponse::Forbidden()
                    .json(ErrorResponse::new(error_codes::FORBIDDEN, "HTTPS required"));
                return Err(InternalError::from_response("HTTPS required", response).into());
            }

            let mut response = service.call(req).await?;
            if config.add_security_headers {
                let headers = response.headers_mut();
                for (name, value) in SECURITY_HEADERS {
                    headers.insert(
                        HeaderName::from_static(name),
                        HeaderValue::from_static(value),
                    );
                }
            }

            Ok(response)
        })
    }
}

fn is_secure_request(req: &ServiceRequest) -> bool {
    if req.connection_info().scheme() == "https" {
        return true;
    }

    req.headers()
        .get(HeaderName::from_static("x-forwarded-proto"))
        .and_then(|v| v.to_str().ok())
        .map(|proto| proto.eq_ignore_ascii_case("https"))
        .unwrap_or(false)
        || req
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(|host| host.starts_with("localhost") || host.starts_with("127.0.0.1"))
            .unwrap_or(false)
}
