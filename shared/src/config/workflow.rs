//! Order workflow configuration

use serde::{Deserialize, Serialize};

/// How strictly order state transitions are enforced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Only transitions in the order transition table are allowed,
    /// and an accepted offer can never be replaced.
    #[default]
    Strict,
    /// Complete and cancel from any state, re-acceptance overwrites.
    Permissive,
}

impl TransitionPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, TransitionPolicy::Strict)
    }
}

impl std::fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionPolicy::Strict => write!(f, "strict"),
            TransitionPolicy::Permissive => write!(f, "permissive"),
        }
    }
}

impl std::str::FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(TransitionPolicy::Strict),
            "permissive" | "legacy" => Ok(TransitionPolicy::Permissive),
            _ => Err(format!("Invalid transition policy: {}", s)),
        }
    }
}

/// Order workflow settings shared by the order and offer services
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// State transition enforcement
    pub policy: TransitionPolicy,

    /// Minimum number of characters in an order location
    pub min_location_length: usize,

    /// Maximum number of characters in an order location
    pub max_location_length: usize,

    /// Minimum number of characters in an order description
    pub min_description_length: usize,

    /// Maximum number of characters in an order title
    pub max_title_length: usize,

    /// Currency assigned to new orders
    pub default_currency: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            policy: TransitionPolicy::Strict,
            min_location_length: 5,
            max_location_length: 150,
            min_description_length: 20,
            max_title_length: 100,
            default_currency: String::from("TND"),
        }
    }
}

impl WorkflowConfig {
    /// Create from environment variables
    ///
    /// An unrecognised `ORDER_TRANSITION_POLICY` is an error rather than a
    /// silent fallback to strict.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        let policy = match std::env::var("ORDER_TRANSITION_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.policy,
        };
        Ok(Self {
            policy,
            default_currency: std::env::var("DEFAULT_CURRENCY")
                .unwrap_or(defaults.default_currency),
            ..defaults
        })
    }

    /// Configuration preserving the legacy free-form transitions
    pub fn permissive() -> Self {
        Self {
            policy: TransitionPolicy::Permissive,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.default_currency.is_empty() || self.default_currency.chars().count() > 5 {
            return Err("workflow.default_currency must be 1 to 5 characters".to_string());
        }
        if self.min_location_length > self.max_location_length {
            return Err("workflow.min_location_length exceeds max_location_length".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("STRICT".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Strict);
        assert_eq!("legacy".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Permissive);
        assert!("loose".parse::<TransitionPolicy>().is_err());
    }

    #[test]
    fn test_currency_validation() {
        let mut config = WorkflowConfig::default();
        assert!(config.validate().is_ok());
        config.default_currency = "DOLLARS".to_string();
        assert!(config.validate().is_err());
    }
}
