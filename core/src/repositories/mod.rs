//! Repository interfaces for persistence, with in-memory implementations.

pub mod offer;
pub mod order;
pub mod provider;
pub mod service_category;
pub mod user;

pub use offer::{MockOfferRepository, OfferRepository};
pub use order::{MockOrderRepository, OrderRepository};
pub use provider::{MockProviderRepository, ProviderRepository};
pub use service_category::{MockServiceCategoryRepository, ServiceCategoryRepository};
pub use user::{MockUserRepository, UserRepository};
