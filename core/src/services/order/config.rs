//! Configuration for the order service

use mp_shared::config::{TransitionPolicy, WorkflowConfig};

/// Configuration for the order service
#[derive(Debug, Clone, Default)]
pub struct OrderServiceConfig {
    /// Transition policy, validation bounds and default currency
    pub workflow: WorkflowConfig,
}

impl OrderServiceConfig {
    pub fn new(workflow: WorkflowConfig) -> Self {
        Self { workflow }
    }

    /// Legacy free-form transitions
    pub fn permissive() -> Self {
        Self::new(WorkflowConfig::permissive())
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.workflow.policy
    }
}
