use crate::config::MAX_PING_TIMEOUT;
use crate::db::{ClientHandle, ClientProvider, DATABASE_TYPE};
use crate::error::DatabaseError;
use crate::models::{DatabaseInfo, DatabaseStatus, StatusReport};
use crate::runtime_stats;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Reported in `service` of every status report.
pub const SERVICE_NAME: &str = "kai-backend";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The moment the process started, captured once in `main` and shared
/// read-only with every request.
#[derive(Debug, Clone, Copy)]
pub struct ProcessStartTime(Instant);

impl ProcessStartTime {
    pub fn capture() -> Self {
        Self(Instant::now())
    }

    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// # Status Reporter
///
/// Produces [`StatusReport`]s for the `/status` endpoint and the GraphQL
/// `status` query. Holds no mutable state: the start time is fixed and the
/// client provider is only read, so one instance is shared by all workers.
///
/// ## Database Probe
/// - No client configured: `disconnected`, no ping attempted, no error
/// - Ping succeeds: `connected`
/// - Ping fails or outlives the timeout (5 s at most): `disconnected`, with
///   the failure text in `database.error`
pub struct StatusReporter {
    started_at: ProcessStartTime,
    provider: Arc<dyn ClientProvider>,
    ping_timeout: Duration,
}

impl StatusReporter {
    pub fn new(started_at: ProcessStartTime, provider: Arc<dyn ClientProvider>) -> Self {
        Self {
            started_at,
            provider,
            ping_timeout: MAX_PING_TIMEOUT,
        }
    }

    /// Shortens the ping timeout. Values above [`MAX_PING_TIMEOUT`] are
    /// clamped to it.
    pub fn with_ping_timeout(mut self, ping_timeout: Duration) -> Self {
        self.ping_timeout = ping_timeout.min(MAX_PING_TIMEOUT);
        self
    }

    pub fn ping_timeout(&self) -> Duration {
        self.ping_timeout
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// # Database Probe
    ///
    /// Pings the database if a client is configured.
    ///
    /// Resolves within the ping timeout: a ping still pending at the deadline
    /// is dropped and reported as [`DatabaseError::Timeout`].
    pub async fn probe_database(&self) -> DatabaseInfo {
        let outcome = match self.provider.client() {
            ClientHandle::Absent => {
                tracing::debug!("no database client configured, skipping ping");
                Err(None)
            }
            ClientHandle::Present(client) => {
                match tokio::time::timeout(self.ping_timeout, client.ping()).await {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(Some(e)),
                    Err(_) => Err(Some(DatabaseError::Timeout(self.ping_timeout))),
                }
            }
        };

        match outcome {
            Ok(()) => DatabaseInfo {
                status: DatabaseStatus::Connected,
                db_type: DATABASE_TYPE.to_string(),
                error: None,
            },
            Err(error) => {
                if let Some(e) = &error {
                    tracing::warn!(error = %e, "database ping failed");
                }
                DatabaseInfo {
                    status: DatabaseStatus::Disconnected,
                    db_type: DATABASE_TYPE.to_string(),
                    error: error.map(|e| e.to_string()),
                }
            }
        }
    }

    /// # Status Report
    ///
    /// Probes the database, then reads uptime and runtime counters. Never
    /// fails: an unreachable database only changes the report's contents.
    pub async fn report(&self) -> StatusReport {
        let database = self.probe_database().await;
        let uptime = format_uptime(self.uptime());
        let system = runtime_stats::collect();

        let report = StatusReport::new(
            SERVICE_NAME,
            SERVICE_VERSION,
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            uptime,
            database,
            system,
        );
        tracing::debug!(status = ?report.status, uptime = %report.uptime, "status report built");
        report
    }
}

/// # Uptime Formatting
///
/// Renders a duration the way Go's `time.Duration` prints:
/// - zero: `0s`
/// - under one second: the largest fitting unit of `ns`, `µs`, `ms`, with a
///   fraction as needed, e.g. `250ms`, `1.5µs`
/// - otherwise `[{h}h][{m}m]{s}[.{frac}]s` with nanosecond precision, e.g.
///   `1h2m3.25s`; hours are not rolled into days
///
/// Trailing zeros of the fraction are dropped.
pub fn format_uptime(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", decimal(nanos, 3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", decimal(nanos, 6));
    }

    let hours = nanos / 3_600_000_000_000;
    let minutes = (nanos / 60_000_000_000) % 60;
    let second_nanos = nanos % 60_000_000_000;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&decimal(second_nanos, 9));
    out.push('s');
    out
}

/// `value / 10^scale` as a decimal string without trailing fractional zeros.
fn decimal(value: u128, scale: u32) -> String {
    let divisor = 10u128.pow(scale);
    let whole = value / divisor;
    let frac = value % divisor;

    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:0width$}", width = scale as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
