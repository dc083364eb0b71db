//! Environment-driven configuration. A `.env` file is honored when present.
//!
//! | variable                | default          |
//! |-------------------------|------------------|
//! | `APP_ENV`               | `development`    |
//! | `APP_HOST`              | `127.0.0.1`      |
//! | `APP_PORT`              | `3000`           |
//! | `APP_LOG_LEVEL`         | per environment  |
//! | `APP_LOG_FORMAT`        | `compact`        |
//! | `GPA_CONVERSION_POLICY` | `semester_table` |
//! | `GPA_INPUT_MODE`        | `permissive`     |

use crate::gpa::{ConversionPolicy, GpaEngine, InputMode};
use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Development builds trace the engine; everything else stays at `info`.
    fn default_log_level(self) -> &'static str {
        match self {
            AppEnvironment::Development => "info,gradebook=debug",
            AppEnvironment::Test | AppEnvironment::Production => "info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub gpa: GpaConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = var("APP_ENV")
            .map(|raw| AppEnvironment::parse(&raw))
            .unwrap_or(AppEnvironment::Development);

        let server = ServerConfig {
            host: var("APP_HOST").unwrap_or_else(|| Ipv4Addr::LOCALHOST.to_string()),
            port: parse_var("APP_PORT", "a port number (0-65535)")?.unwrap_or(3000),
        };

        let telemetry = TelemetryConfig {
            log_level: var("APP_LOG_LEVEL")
                .unwrap_or_else(|| environment.default_log_level().to_string()),
            format: parse_var("APP_LOG_FORMAT", "compact or pretty")?.unwrap_or_default(),
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            gpa: GpaConfig::from_env()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolves `host` to a bind address. `localhost` is the only name accepted.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host.parse().map_err(|_| ConfigError::Invalid {
                key: "APP_HOST",
                value: self.host.clone(),
                expected: "an IPv4 or IPv6 address",
            })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive list, e.g. `info,gradebook::gpa=debug`.
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(()),
        }
    }
}

/// Grading defaults applied when a request does not pick its own policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpaConfig {
    pub policy: ConversionPolicy,
    pub input_mode: InputMode,
}

impl GpaConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            policy: parse_var(
                "GPA_CONVERSION_POLICY",
                "linear, standard_table or semester_table",
            )?
            .unwrap_or_default(),
            input_mode: parse_var("GPA_INPUT_MODE", "permissive or strict")?.unwrap_or_default(),
        })
    }

    pub fn engine(&self) -> GpaEngine {
        GpaEngine::new(self.policy, self.input_mode)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError> {
    var(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
                key,
                value,
                expected,
            })
        })
        .transpose()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid {
                key,
                value,
                expected,
            } => write!(f, "{key}='{value}' is invalid, expected {expected}"),
        }
    }
}

impl std::error::Error for ConfigError {}
