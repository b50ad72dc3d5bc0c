//! Provider entity: a user registered to deliver one category of service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of the national identity document number
pub const MAX_CIN_LENGTH: usize = 20;

/// Provider entity
///
/// A provider record starts as a pending request (`is_approved == false`) and
/// becomes eligible to bid once an administrator approves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,

    /// Owning user; at most one provider record per user
    pub user_id: Uuid,

    /// National identity document number, unique when present
    pub cin: Option<String>,

    /// The single service category this provider works in
    pub service_id: Uuid,

    pub location: String,

    /// Reference to the uploaded proof document
    pub proof_document: String,

    pub is_approved: bool,

    pub created_at: DateTime<Utc>,
}

/// Input for a provider request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProvider {
    pub service_id: Uuid,
    pub cin: Option<String>,
    pub location: String,
    pub proof_document: String,
}

impl Provider {
    /// Creates a pending provider request for `user_id`
    pub fn new(user_id: Uuid, request: NewProvider) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            cin: request.cin,
            service_id: request.service_id,
            location: request.location,
            proof_document: request.proof_document,
            is_approved: false,
            created_at: Utc::now(),
        }
    }

    /// Marks the request as approved
    pub fn approve(&mut self) {
        self.is_approved = true;
    }
}
