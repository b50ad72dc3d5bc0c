//! Administrator decisions on provider requests.

use std::str::FromStr;

use crate::domain::entities::Provider;
use crate::errors::ValidationError;

/// What an administrator does with a pending provider request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl FromStr for ReviewAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ReviewAction::Approve),
            "reject" => Ok(ReviewAction::Reject),
            other => Err(ValidationError::InvalidAction {
                action: other.to_string(),
            }),
        }
    }
}

/// Result of reviewing a provider request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Approved(Provider),
    /// The request was deleted
    Rejected,
}

impl ReviewOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ReviewOutcome::Approved(_) => "Provider approved.",
            ReviewOutcome::Rejected => "Provider request rejected.",
        }
    }
}
