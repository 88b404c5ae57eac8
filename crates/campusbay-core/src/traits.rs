//! Cross-layer traits.

use async_trait::async_trait;
use serde::Serialize;

/// A component whose availability can be probed by readiness checks.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is degraded but functional.
    Degraded(String),
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns true if the status is unhealthy.
    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysDown;

    #[async_trait]
    impl HealthCheck for AlwaysDown {
        fn name(&self) -> &str {
            "always-down"
        }

        async fn check(&self) -> HealthStatus {
            HealthStatus::Unhealthy("unreachable".to_string())
        }
    }

    #[tokio::test]
    async fn test_health_check_trait_object() {
        let check: Box<dyn HealthCheck> = Box::new(AlwaysDown);
        let status = check.check().await;
        assert!(status.is_unhealthy());
        assert!(!status.is_healthy());
        assert_eq!(check.name(), "always-down");
    }

    #[test]
    fn test_degraded_is_neither() {
        let status = HealthStatus::Degraded("cache disabled".to_string());
        assert!(!status.is_healthy());
        assert!(!status.is_unhealthy());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(HealthStatus::Healthy).unwrap();
        assert_eq!(json["status"], "healthy");
        let json = serde_json::to_value(HealthStatus::Unhealthy("db".into())).unwrap();
        assert_eq!(json["reason"], "db");
    }
}
