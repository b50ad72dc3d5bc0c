//! Order ledger service
//!
//! Owns the order lifecycle and the matching rules between orders and
//! providers:
//! - Clients create orders and list their own
//! - Providers discover orders in their category they have not engaged with
//! - Providers accept an offer; orders are then completed or cancelled

mod config;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use config::OrderServiceConfig;
pub use service::OrderService;
