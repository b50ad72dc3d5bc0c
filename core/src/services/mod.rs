//! Business services containing domain logic and use cases.

pub mod catalog;
pub mod offer;
pub mod order;
pub mod provider;

// Re-export commonly used types
pub use catalog::CatalogService;
pub use offer::OfferService;
pub use order::{OrderService, OrderServiceConfig};
pub use provider::{ProviderService, ProviderServiceConfig};
