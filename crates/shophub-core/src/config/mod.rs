//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod logging;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthServiceConfig;
use self::logging::LoggingConfig;
use self::rate_limit::RateLimitConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) plus
/// `SHOPHUB__*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Hosted auth service settings.
    pub auth: AuthServiceConfig,
    /// Rate limiter settings.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, an optional overlay file,
    /// and `SHOPHUB__*` environment variables (highest precedence).
    pub fn load(path: &str, overlay: Option<&str>) -> Result<Self, AppError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name(path));

        if let Some(overlay_path) = overlay {
            builder = builder
                .add_source(config::File::with_name(overlay_path).required(false));
        }

        builder = builder
            .add_source(config::Environment::with_prefix("SHOPHUB").separator("__"));

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
