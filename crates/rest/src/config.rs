//! Server configuration for the EMR REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `EMR_SERVER_PORT` | 8000 | Server port |
//! | `EMR_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `EMR_LOG_LEVEL` | info | Log level |
//! | `EMR_LOG_FORMAT` | json | Log output format (`json` or `text`) |
//! | `EMR_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `EMR_DATA_FILE` | data/db.json | Document store file, or `:memory:` |
//! | `EMR_JWT_SECRET` | (demo secret) | HS256 signing secret |
//! | `EMR_PASSWORD_HASH_COST` | 12 | bcrypt work factor |
//! | `EMR_CORS_ORIGIN` | http://localhost:3000 | The single allowed CORS origin |
//! | `EMR_ENABLE_DEMO_ROUTES` | true | Mount `POST /demo/create-user` |
//! | `EMR_ENABLE_METRICS` | true | Install the Prometheus recorder |
//! | `SENTRY_DSN` | (unset) | Enables Sentry error reporting |
//!
//! # Example
//!
//! ```rust
//! use easy_emr_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use std::fmt;
use std::str::FromStr;

use clap::Parser;

use crate::auth::password::{MAX_HASH_COST, MIN_HASH_COST};

/// Data file value that selects the in-memory store.
pub const IN_MEMORY_DATA_FILE: &str = ":memory:";

/// Signing secret used when `EMR_JWT_SECRET` is not set.
pub const DEFAULT_JWT_SECRET: &str = "easy-emr-demo-secret-change-me";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable text.
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" => Ok(LogFormat::Text),
            other => Err(format!("unknown log format '{other}' (expected json or text)")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Text => write!(f, "text"),
        }
    }
}

/// Server configuration for the EMR REST API.
///
/// This struct can be constructed from command line arguments and environment
/// variables using [`ServerConfig::parse`], or programmatically.
#[derive(Clone, Parser)]
#[command(name = "easy-emr")]
#[command(about = "Easy EMR demo backend")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "EMR_SERVER_PORT", default_value = "8000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "EMR_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "EMR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format (json, text).
    #[arg(long, env = "EMR_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,

    /// Request timeout in seconds.
    #[arg(long, env = "EMR_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Path of the JSON data file, or `:memory:` for an ephemeral store.
    #[arg(long, env = "EMR_DATA_FILE", default_value = "data/db.json")]
    pub data_file: String,

    /// Secret used to sign and verify access tokens.
    #[arg(long, env = "EMR_JWT_SECRET", default_value = DEFAULT_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// bcrypt work factor for new password hashes.
    #[arg(long, env = "EMR_PASSWORD_HASH_COST", default_value = "12")]
    pub password_hash_cost: u32,

    /// The single origin allowed by CORS.
    #[arg(long, env = "EMR_CORS_ORIGIN", default_value = "http://localhost:3000")]
    pub cors_origin: String,

    /// Mount the unauthenticated demo user creation route.
    #[arg(long, env = "EMR_ENABLE_DEMO_ROUTES", default_value = "true", action = clap::ArgAction::Set)]
    pub enable_demo_routes: bool,

    /// Install the Prometheus recorder and serve `/metrics`.
    #[arg(long, env = "EMR_ENABLE_METRICS", default_value = "true", action = clap::ArgAction::Set)]
    pub enable_metrics: bool,

    /// Sentry DSN; error reporting is disabled when unset.
    #[arg(long, env = "SENTRY_DSN", hide_env_values = true)]
    pub sentry_dsn: Option<String>,
}

// Secrets stay out of logs.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("host", &self.host)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("request_timeout", &self.request_timeout)
            .field("data_file", &self.data_file)
            .field("jwt_secret", &"<redacted>")
            .field("password_hash_cost", &self.password_hash_cost)
            .field("cors_origin", &self.cors_origin)
            .field("enable_demo_routes", &self.enable_demo_routes)
            .field("enable_metrics", &self.enable_metrics)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            request_timeout: 30,
            data_file: "data/db.json".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            password_hash_cost: 12,
            cors_origin: "http://localhost:3000".to_string(),
            enable_demo_routes: true,
            enable_metrics: true,
            sentry_dsn: None,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true if the data file selects the in-memory store.
    pub fn uses_memory_store(&self) -> bool {
        self.data_file == IN_MEMORY_DATA_FILE
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.data_file.trim().is_empty() {
            errors.push("Data file cannot be empty".to_string());
        }

        if self.jwt_secret.is_empty() {
            errors.push("JWT secret cannot be empty".to_string());
        }

        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.password_hash_cost) {
            errors.push(format!(
                "Password hash cost must be between {MIN_HASH_COST} and {MAX_HASH_COST}"
            ));
        }

        if self.cors_origin.parse::<http::HeaderValue>().is_err() {
            errors.push(format!("Invalid CORS origin: {}", self.cors_origin));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, the in-memory store, the cheapest bcrypt
    /// cost and no metrics recorder.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            log_format: LogFormat::Text,
            request_timeout: 5,
            data_file: IN_MEMORY_DATA_FILE.to_string(),
            jwt_secret: "test-secret".to_string(),
            password_hash_cost: MIN_HASH_COST,
            enable_metrics: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.enable_demo_routes);
        assert!(!config.uses_memory_store());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_hash_cost_range() {
        for cost in [3, 32] {
            let config = ServerConfig {
                password_hash_cost: cost,
                ..Default::default()
            };
            let errors = config.validate().unwrap_err();
            assert!(errors.iter().any(|e| e.contains("hash cost")));
        }
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_parse_from_args() {
        let config = ServerConfig::try_parse_from([
            "easy-emr",
            "--port",
            "9000",
            "--data-file",
            ":memory:",
            "--enable-demo-routes",
            "false",
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.uses_memory_store());
        assert!(!config.enable_demo_routes);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", ServerConfig::default());
        assert!(!rendered.contains(DEFAULT_JWT_SECRET));
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(config.uses_memory_store());
        assert!(!config.enable_metrics);
        assert_eq!(config.password_hash_cost, 4);
    }
}
