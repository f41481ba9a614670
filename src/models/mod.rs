/// # Service Status Report
///
/// Serializable snapshot of service health: database reachability, uptime,
/// and runtime statistics. Returned by `GET /status` and mirrored by the
/// GraphQL `status` query.
pub mod status;

pub use status::{
    DatabaseInfo, DatabaseStatus, HealthStatus, MemoryInfo, StatusReport, SystemInfo,
};
