//! Runtime settings read from `.env` and `APP_*` variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

const ENV_KEY: &str = "APP_ENV";
const HOST_KEY: &str = "APP_HOST";
const PORT_KEY: &str = "APP_PORT";
const LOG_LEVEL_KEY: &str = "APP_LOG_LEVEL";
const QUEUE_DEPTH_KEY: &str = "APP_WORKER_QUEUE_DEPTH";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage, used for log context only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    /// Lenient: unknown labels run as development.
    fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub worker: WorkerConfig,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = read(ENV_KEY)
            .map(|label| AppEnvironment::from_label(&label))
            .unwrap_or_default();

        let server = ServerConfig {
            host: read(HOST_KEY).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(read(PORT_KEY), PORT_KEY, DEFAULT_PORT)?,
        };

        let telemetry = TelemetryConfig {
            log_level: read(LOG_LEVEL_KEY).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        };

        let queue_depth = parse_or(
            read(QUEUE_DEPTH_KEY),
            QUEUE_DEPTH_KEY,
            WorkerConfig::DEFAULT_QUEUE_DEPTH,
        )?;
        if queue_depth == 0 {
            return Err(ConfigError::Invalid {
                key: QUEUE_DEPTH_KEY,
                value: "0".to_string(),
            });
        }

        Ok(Self {
            environment,
            server,
            telemetry,
            worker: WorkerConfig { queue_depth },
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `localhost` maps to the IPv4 loopback; anything else must be an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Background calculation worker sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Requests that may wait in the worker queue before senders back off.
    pub queue_depth: usize,
}

impl WorkerConfig {
    pub const DEFAULT_QUEUE_DEPTH: usize = 64;
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_depth: Self::DEFAULT_QUEUE_DEPTH,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}='{value}' is not a valid value")]
    Invalid { key: &'static str, value: String },
    #[error("APP_HOST '{host}' is neither localhost nor an IP address")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
