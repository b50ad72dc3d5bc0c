//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of the core repository traits
//! using SQLx for database operations. Identifiers are stored as
//! `CHAR(36)` UUID strings and prices as `DECIMAL(10, 2)`.

mod rows;

pub mod offer_repository_impl;
pub mod order_repository_impl;
pub mod provider_repository_impl;
pub mod service_category_repository_impl;
pub mod user_repository_impl;

// Re-export the MySQL implementations
pub use offer_repository_impl::MySqlOfferRepository;
pub use order_repository_impl::MySqlOrderRepository;
pub use provider_repository_impl::MySqlProviderRepository;
pub use service_category_repository_impl::MySqlServiceCategoryRepository;
pub use user_repository_impl::MySqlUserRepository;
