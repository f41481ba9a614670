use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
/// Ceiling on the database ping. Configuration may shorten it, never extend it.
pub const MAX_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// # Service Configuration
///
/// Read from process environment variables, after `.env` has been loaded.
///
/// ## Variables
/// - `HOST`: bind address (default `127.0.0.1`)
/// - `PORT`: bind port (default `8080`)
/// - `MONGODB_URI`: MongoDB connection string; unset or empty means no database client
/// - `STATUS_PING_TIMEOUT_SECS`: upper bound on the database ping, 1 to 5 (default `5`)
/// - `LOG_FORMAT`: `pretty` or `json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: Option<String>,
    pub ping_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let ping_timeout = match non_empty("STATUS_PING_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 && secs <= MAX_PING_TIMEOUT.as_secs() => {
                    Duration::from_secs(secs)
                }
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => MAX_PING_TIMEOUT,
        };

        let log_format = match non_empty("LOG_FORMAT").as_deref() {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            mongodb_uri: non_empty("MONGODB_URI"),
            ping_timeout,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.mongodb_uri, None);
        assert_eq!(config.ping_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("MONGODB_URI", "mongodb://localhost:27017"),
            ("STATUS_PING_TIMEOUT_SECS", "2"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.mongodb_uri.as_deref(),
            Some("mongodb://localhost:27017")
        );
        assert_eq!(config.ping_timeout, Duration::from_secs(2));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_empty_mongodb_uri_means_no_client() {
        let config = Config::from_lookup(lookup_from(&[("MONGODB_URI", "  ")])).unwrap();
        assert_eq!(config.mongodb_uri, None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "99999")]));
        assert_eq!(result, Err(ConfigError::InvalidPort("99999".to_string())));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("STATUS_PING_TIMEOUT_SECS", "0")]));
        assert_eq!(result, Err(ConfigError::InvalidTimeout("0".to_string())));
    }

    #[test]
    fn test_timeout_above_five_seconds_is_rejected() {
        // Arrange
        let lookup = lookup_from(&[("STATUS_PING_TIMEOUT_SECS", "6")]);

        // Act
        let result = Config::from_lookup(lookup);

        // Assert
        assert_eq!(result, Err(ConfigError::InvalidTimeout("6".to_string())));
    }

    #[test]
    fn test_service_name_is_not_configurable() {
        let config = Config::from_lookup(lookup_from(&[("SERVICE_NAME", "other")])).unwrap();
        assert_eq!(config, Config::from_lookup(lookup_from(&[])).unwrap());
    }

    #[test]
    fn test_non_numeric_timeout_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("STATUS_PING_TIMEOUT_SECS", "soon")]));
        assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))));
    }
}
