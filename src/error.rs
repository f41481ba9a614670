use std::time::Duration;

/// Failures while reading service configuration from the environment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("STATUS_PING_TIMEOUT_SECS must be an integer from 1 to 5, got {0:?}")]
    InvalidTimeout(String),
}

/// Reasons the database is considered unreachable.
///
/// The `Display` output is what ends up in `database.error` of the status
/// report, so `Ping` carries the driver message verbatim.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("failed to create database client: {0}")]
    Connect(String),

    #[error("{0}")]
    Ping(String),

    #[error("database ping timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl From<mongodb::error::Error> for DatabaseError {
    fn from(err: mongodb::error::Error) -> Self {
        DatabaseError::Ping(err.to_string())
    }
}
