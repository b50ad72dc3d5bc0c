//! Configuration for the provider directory service

use crate::domain::entities::provider::MAX_CIN_LENGTH;

/// Configuration for the provider directory service
#[derive(Debug, Clone)]
pub struct ProviderServiceConfig {
    /// Maximum length of the national identity document number
    pub max_cin_length: usize,
    /// Whether a provider request must carry a national identity number
    pub require_cin: bool,
}

impl Default for ProviderServiceConfig {
    fn default() -> Self {
        Self {
            max_cin_length: MAX_CIN_LENGTH,
            require_cin: false,
        }
    }
}
