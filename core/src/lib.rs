//! # Marketplace Core
//!
//! Core business logic and domain layer for the service marketplace.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    NewOrder, NewProvider, Offer, Order, OrderDecline, OrderMedia, OrderState, Provider,
    ServiceCategory, User,
};
pub use domain::value_objects::{Actor, OfferView, OrderDetails, ReviewAction, ReviewOutcome};
pub use errors::{DomainError, DomainResult, ValidationError};
pub use repositories::{
    OfferRepository, OrderRepository, ProviderRepository, ServiceCategoryRepository,
    UserRepository,
};
pub use services::{
    CatalogService, OfferService, OrderService, OrderServiceConfig, ProviderService,
    ProviderServiceConfig,
};
