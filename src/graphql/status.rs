use crate::models::{self, DatabaseStatus, HealthStatus, StatusReport};
use crate::reporter::StatusReporter;
use async_graphql::{Context, Object, Result, SimpleObject};
use std::sync::Arc;

/// GraphQL view of [`StatusReport`]. Enum values are exposed as the same
/// lowercase strings the REST endpoint uses.
#[derive(Debug, SimpleObject)]
pub struct ServiceStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub uptime: String,
    pub database: DatabaseState,
    pub system: SystemState,
}

#[derive(Debug, SimpleObject)]
pub struct DatabaseState {
    pub status: String,
    #[graphql(name = "type")]
    pub db_type: String,
    pub error: Option<String>,
}

#[derive(Debug, SimpleObject)]
pub struct SystemState {
    pub rust_version: String,
    pub num_tasks: u64,
    pub num_cpu: u64,
    pub memory: MemoryState,
}

#[derive(Debug, SimpleObject)]
pub struct MemoryState {
    pub alloc_mb: u64,
    pub total_alloc_mb: u64,
    pub sys_mb: u64,
}

impl From<StatusReport> for ServiceStatus {
    fn from(report: StatusReport) -> Self {
        let status = match report.status {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        };
        let database_status = match report.database.status {
            DatabaseStatus::Connected => "connected",
            DatabaseStatus::Disconnected => "disconnected",
        };
        let models::SystemInfo {
            rust_version,
            num_tasks,
            num_cpu,
            memory,
        } = report.system;

        Self {
            status: status.to_string(),
            service: report.service,
            version: report.version,
            timestamp: report.timestamp,
            uptime: report.uptime,
            database: DatabaseState {
                status: database_status.to_string(),
                db_type: report.database.db_type,
                error: report.database.error,
            },
            system: SystemState {
                rust_version,
                num_tasks: num_tasks as u64,
                num_cpu: num_cpu as u64,
                memory: MemoryState {
                    alloc_mb: memory.alloc_mb,
                    total_alloc_mb: memory.total_alloc_mb,
                    sys_mb: memory.sys_mb,
                },
            },
        }
    }
}

#[derive(Default)]
pub struct StatusQuery;

#[Object]
impl StatusQuery {
    /// Current service status, including database reachability.
    ///
    /// Always resolves; an unreachable database is reported in the payload.
    async fn status(&self, ctx: &Context<'_>) -> Result<ServiceStatus> {
        let reporter = ctx.data::<Arc<StatusReporter>>()?;
        Ok(reporter.report().await.into())
    }
}
