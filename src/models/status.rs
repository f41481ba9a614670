use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate health verdict of the service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Reachability of the backing database.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct DatabaseInfo {
    pub status: DatabaseStatus,
    #[serde(rename = "type")]
    pub db_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Memory counters in whole megabytes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct MemoryInfo {
    pub alloc_mb: u64,
    pub total_alloc_mb: u64,
    pub sys_mb: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct SystemInfo {
    pub rust_version: String,
    pub num_tasks: usize,
    pub num_cpu: usize,
    pub memory: MemoryInfo,
}

/// # Service Status Report
///
/// Point-in-time snapshot returned by `GET /status`. Built fresh for every
/// request and never cached.
///
/// `status` is `unhealthy` exactly when `database.status` is `disconnected`;
/// use [`StatusReport::new`] to keep the two consistent.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "unhealthy",
///   "service": "kai-backend",
///   "version": "1.0.0",
///   "timestamp": "2024-03-10T15:30:45Z",
///   "uptime": "1h2m3.25s",
///   "database": { "status": "disconnected", "type": "mongodb", "error": "connection refused" },
///   "system": {
///     "rust_version": "1.85.0",
///     "num_tasks": 3,
///     "num_cpu": 8,
///     "memory": { "alloc_mb": 4, "total_alloc_mb": 12, "sys_mb": 18 }
///   }
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct StatusReport {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub uptime: String,
    pub database: DatabaseInfo,
    pub system: SystemInfo,
}

impl StatusReport {
    /// Assembles a report, deriving the top-level status from the database
    /// status. The error string is only kept for a disconnected database.
    pub fn new(
        service: impl Into<String>,
        version: impl Into<String>,
        timestamp: String,
        uptime: String,
        mut database: DatabaseInfo,
        system: SystemInfo,
    ) -> Self {
        let status = match database.status {
            DatabaseStatus::Connected => {
                database.error = None;
                HealthStatus::Healthy
            }
            DatabaseStatus::Disconnected => HealthStatus::Unhealthy,
        };

        Self {
            status,
            service: service.into(),
            version: version.into(),
            timestamp,
            uptime,
            database,
            system,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
