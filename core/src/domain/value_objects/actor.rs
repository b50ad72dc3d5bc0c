//! The caller's role-tagged identity, resolved once per request.

use uuid::Uuid;

use crate::domain::entities::{Provider, User};
use crate::errors::{DomainError, DomainResult};

/// Who is making the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Client { user: User },
    Provider { user: User, provider: Provider },
    Admin { user: User },
}

impl Actor {
    /// Resolves the role of `user`. Owning a provider record takes
    /// precedence over the admin flag.
    pub fn resolve(user: User, provider: Option<Provider>) -> Self {
        match provider {
            Some(provider) => Actor::Provider { user, provider },
            None if user.is_admin => Actor::Admin { user },
            None => Actor::Client { user },
        }
    }

    pub fn user(&self) -> &User {
        match self {
            Actor::Client { user } | Actor::Provider { user, .. } | Actor::Admin { user } => user,
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user().id
    }

    pub fn provider(&self) -> Option<&Provider> {
        match self {
            Actor::Provider { provider, .. } => Some(provider),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_admin
    }

    /// The approved provider record behind this actor
    ///
    /// `NotFound` when the caller has no provider record, `Forbidden` while
    /// the request is still awaiting approval.
    pub fn require_provider(&self) -> DomainResult<&Provider> {
        let provider = self
            .provider()
            .ok_or_else(|| DomainError::not_found("Provider"))?;
        if !provider.is_approved {
            return Err(DomainError::forbidden("Provider request is not approved yet"));
        }
        Ok(provider)
    }

    pub fn require_admin(&self) -> DomainResult<&User> {
        if !self.is_admin() {
            return Err(DomainError::forbidden("Administrator access required"));
        }
        Ok(self.user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewProvider;

    fn provider_for(user: &User, approved: bool) -> Provider {
        let mut provider = Provider::new(
            user.id,
            NewProvider {
                service_id: Uuid::new_v4(),
                cin: None,
                location: "Monastir".to_string(),
                proof_document: "proof.pdf".to_string(),
            },
        );
        if approved {
            provider.approve();
        }
        provider
    }

    #[test]
    fn test_resolve_roles() {
        let client = User::new("client");
        assert!(matches!(Actor::resolve(client, None), Actor::Client { .. }));

        let admin = User::admin("admin");
        assert!(matches!(Actor::resolve(admin, None), Actor::Admin { .. }));

        let user = User::admin("both");
        let provider = provider_for(&user, true);
        let actor = Actor::resolve(user, Some(provider));
        assert!(matches!(actor, Actor::Provider { .. }));
        assert!(actor.is_admin());
    }

    #[test]
    fn test_require_provider() {
        let client = Actor::resolve(User::new("client"), None);
        assert!(matches!(
            client.require_provider(),
            Err(DomainError::NotFound { .. })
        ));

        let user = User::new("pending");
        let pending = provider_for(&user, false);
        let actor = Actor::resolve(user, Some(pending));
        assert!(matches!(
            actor.require_provider(),
            Err(DomainError::Forbidden { .. })
        ));

        let user = User::new("approved");
        let approved = provider_for(&user, true);
        let actor = Actor::resolve(user, Some(approved.clone()));
        assert_eq!(actor.require_provider().unwrap(), &approved);
    }

    #[test]
    fn test_require_admin() {
        assert!(Actor::resolve(User::admin("root"), None).require_admin().is_ok());
        assert!(Actor::resolve(User::new("bob"), None).require_admin().is_err());
    }
}
