//! Provider directory service
//!
//! Handles role resolution for incoming requests and the provider
//! approval workflow:
//! - Users submit a provider request for one service category
//! - Administrators list pending requests
//! - Administrators approve (or reject and delete) a request

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::ProviderServiceConfig;
pub use service::ProviderService;
