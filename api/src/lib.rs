//! HTTP surface of the service marketplace
//!
//! - `app` - application factory
//! - `dto` - request and response bodies
//! - `handlers` - error mapping
//! - `health` - dependency checks for the health endpoint
//! - `middleware` - JWT authentication, CORS, security headers
//! - `routes` - route handlers and shared state

pub mod app;
pub mod dto;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
