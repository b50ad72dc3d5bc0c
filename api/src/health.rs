//! Dependency checks reported by `GET /health`

use std::time::Instant;

use async_trait::async_trait;
use mp_infra::database::DatabasePool;
use mp_shared::{HealthStatus, ServiceHealth};

/// A backing service whose health is reported under [`HealthCheck::name`]
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> ServiceHealth;
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> ServiceHealth {
        let started = Instant::now();
        let result = self.health_check().await;
        let response_time_ms = Some(started.elapsed().as_millis() as u64);

        match result {
            Ok(true) => ServiceHealth {
                status: HealthStatus::Healthy,
                message: Some(self.get_statistics().to_string()),
                response_time_ms,
            },
            Ok(false) => ServiceHealth {
                status: HealthStatus::Degraded,
                message: Some("Unexpected health query result".to_string()),
                response_time_ms,
            },
            // Connection details stay in the logs
            Err(_) => ServiceHealth {
                status: HealthStatus::Unhealthy,
                message: Some("Database unreachable".to_string()),
                response_time_ms,
            },
        }
    }
}
