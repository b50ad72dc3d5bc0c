//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Bearer token verification configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `workflow` - Order workflow policy and validation thresholds

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;
pub mod workflow;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;
pub use workflow::{TransitionPolicy, WorkflowConfig};

/// Prefix for environment overrides applied on top of a configuration file,
/// e.g. `MP__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "MP";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token verification configuration
    pub auth: AuthConfig,

    /// Order workflow configuration
    pub workflow: WorkflowConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            workflow: WorkflowConfig::from_env().map_err(ConfigError::Invalid)?,
            logging: LoggingConfig::for_environment(environment),
        })
    }

    /// Load configuration from an optional TOML file, then apply `MP__*`
    /// environment overrides on top of it.
    ///
    /// Missing keys fall back to their defaults, so an absent file yields
    /// the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the combination of settings for obvious mistakes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.auth.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "JWT secret must be set in production".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }
        self.workflow.validate().map_err(ConfigError::Invalid)
    }
}
