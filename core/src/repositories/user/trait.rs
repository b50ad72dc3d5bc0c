//! User repository trait.
//!
//! Users are owned by the authentication layer; the marketplace reads them
//! to resolve roles and display names.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User lookups
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Display name for a user, or an empty string when the user is gone
    async fn username(&self, id: Uuid) -> Result<String, DomainError> {
        Ok(self
            .find_by_id(id)
            .await?
            .map(|user| user.username)
            .unwrap_or_default())
    }

    /// Insert a user (used for seeding and tests)
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
