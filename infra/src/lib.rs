//! # Infrastructure Layer
//!
//! Concrete implementations of the marketplace's repository traits,
//! following Clean Architecture principles.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations using SQLx, the connection pool
//!   and the schema migrations under `migrations/`
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "mysql")]
pub use database::{
    DatabasePool, MySqlOfferRepository, MySqlOrderRepository, MySqlProviderRepository,
    MySqlServiceCategoryRepository, MySqlUserRepository, PoolStatistics,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
