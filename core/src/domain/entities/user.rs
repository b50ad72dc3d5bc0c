//! User entity representing a registered account in the marketplace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity
///
/// Accounts are created by the authentication layer; the marketplace only
/// reads them for display names and role resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name shown next to orders and offers
    pub username: String,

    /// Whether the user administers the marketplace
    pub is_admin: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new regular user
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    /// Creates a new administrator
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            is_admin: true,
            ..Self::new(username)
        }
    }
}
