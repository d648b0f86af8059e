//! Health check service for the readiness probe

use serde::Serialize;
use sqlx::SqlitePool;
use std::time::{Duration, Instant};

/// Status of an individual dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// Result of a single dependency check
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    /// Name of the dependency
    pub name: &'static str,
    pub status: ServiceStatus,
    /// Response time in milliseconds (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServiceHealth {
    /// Create a healthy result with details
    pub fn healthy_with_details(
        name: &'static str,
        response_time: Duration,
        details: serde_json::Value,
    ) -> Self {
        Self {
            name,
            status: ServiceStatus::Healthy,
            response_time_ms: Some(response_time.as_millis() as u64),
            error: None,
            details: Some(details),
        }
    }

    /// Create an unhealthy result with response time
    pub fn unhealthy_with_time(
        name: &'static str,
        error: impl Into<String>,
        response_time: Duration,
    ) -> Self {
        Self {
            name,
            status: ServiceStatus::Unhealthy,
            response_time_ms: Some(response_time.as_millis() as u64),
            error: Some(error.into()),
            details: None,
        }
    }
}

/// Aggregated health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    /// Healthy only if every dependency is healthy
    pub status: ServiceStatus,
    pub services: Vec<ServiceHealth>,
    /// Total time to complete all checks
    pub total_time_ms: u64,
    pub version: &'static str,
}

impl HealthCheckResponse {
    /// Build a response from individual results
    pub fn new(services: Vec<ServiceHealth>, total_time: Duration) -> Self {
        let status = if services.iter().all(|s| s.status == ServiceStatus::Healthy) {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unhealthy
        };

        Self {
            status,
            services,
            total_time_ms: total_time.as_millis() as u64,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Whether all dependencies are healthy
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

/// Health check service
#[derive(Clone)]
pub struct HealthService {
    pool: SqlitePool,
}

impl HealthService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check that the SQLite database answers queries
    pub async fn check_database(&self) -> ServiceHealth {
        let start = Instant::now();

        match sqlx::query_scalar::<_, String>("SELECT sqlite_version()")
            .fetch_one(&self.pool)
            .await
        {
            Ok(version) => ServiceHealth::healthy_with_details(
                "database",
                start.elapsed(),
                serde_json::json!({ "engine": "sqlite", "version": version }),
            ),
            Err(e) => ServiceHealth::unhealthy_with_time(
                "database",
                format!("Query failed: {}", e),
                start.elapsed(),
            ),
        }
    }

    /// Run every dependency check
    pub async fn check_all(&self) -> HealthCheckResponse {
        let start = Instant::now();
        let database = self.check_database().await;
        HealthCheckResponse::new(vec![database], start.elapsed())
    }
}
