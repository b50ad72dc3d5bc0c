use chrono::{DateTime, Utc};
use mp_core::domain::entities::{NewProvider, Provider};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Body of `POST /api/v1/provider/create`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProviderRequest {
    #[serde(alias = "service_id")]
    pub service: Uuid,

    #[serde(default)]
    pub cin: Option<String>,

    #[validate(length(max = 255))]
    pub location: String,

    /// Reference to the uploaded proof document
    #[validate(length(max = 255))]
    pub proof_document: String,
}

impl From<CreateProviderRequest> for NewProvider {
    fn from(request: CreateProviderRequest) -> Self {
        NewProvider {
            service_id: request.service,
            cin: request.cin,
            location: request.location,
            proof_document: request.proof_document,
        }
    }
}

/// Body of `PATCH /api/v1/provider/approve/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// `approve` or `reject`
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub id: Uuid,
    pub user: Uuid,
    pub service: Uuid,
    pub cin: Option<String>,
    pub location: String,
    pub proof_document: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Provider> for ProviderResponse {
    fn from(provider: Provider) -> Self {
        Self {
            id: provider.id,
            user: provider.user_id,
            service: provider.service_id,
            cin: provider.cin,
            location: provider.location,
            proof_document: provider.proof_document,
            is_approved: provider.is_approved,
            created_at: provider.created_at,
        }
    }
}
