//! Configuration management for Wayfare services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// External identity provider configuration
    pub identity: IdentityConfig,

    /// Itinerary generation service configuration
    pub generator: GeneratorConfig,

    /// Client SDK configuration
    pub client: ClientConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Primary database URL (for writes)
    pub url: String,

    /// Read replica URL (optional, falls back to primary)
    pub read_url: Option<String>,

    /// Maximum number of connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Session-data endpoint of the external identity provider
    #[serde(default = "default_identity_url")]
    pub session_data_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_identity_timeout")]
    pub timeout_secs: u64,

    /// Lifetime of issued sessions, in days
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Chat-completions base URL of the generation service
    #[serde(default = "default_generator_base")]
    pub api_base: String,

    /// API key for the generation service
    pub api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_generator_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_generator_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// API base the SDK talks to, e.g. "https://api.example.com"
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-call transport budget in seconds. A timeout is treated exactly
    /// like any other transport failure.
    #[serde(default = "default_client_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 30 }
fn default_max_connections() -> u32 { 50 }
fn default_min_connections() -> u32 { 5 }
fn default_connect_timeout() -> u64 { 10 }
fn default_idle_timeout() -> u64 { 300 }
fn default_identity_url() -> String {
    "https://auth.example.com/v1/oauth/session-data".to_string()
}
fn default_identity_timeout() -> u64 { 10 }
fn default_session_ttl_days() -> i64 { 7 }
fn default_generator_base() -> String { "https://api.openai.com/v1".to_string() }
fn default_generator_model() -> String { "gpt-4o-mini".to_string() }
fn default_generator_timeout() -> u64 { 30 }
fn default_api_base() -> String { "http://localhost:8080".to_string() }
fn default_client_timeout() -> u64 { 10 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "wayfare".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Get the read database URL (falls back to primary)
    pub fn read_database_url(&self) -> &str {
        self.database.read_url.as_deref().unwrap_or(&self.database.url)
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                request_timeout_secs: default_request_timeout(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/wayfare".to_string(),
                read_url: None,
                max_connections: default_max_connections(),
                min_connections: default_min_connections(),
                connect_timeout_secs: default_connect_timeout(),
                idle_timeout_secs: default_idle_timeout(),
            },
            identity: IdentityConfig {
                session_data_url: default_identity_url(),
                timeout_secs: default_identity_timeout(),
                session_ttl_days: default_session_ttl_days(),
            },
            generator: GeneratorConfig {
                api_base: default_generator_base(),
                api_key: None,
                model: default_generator_model(),
                timeout_secs: default_generator_timeout(),
            },
            client: ClientConfig {
                api_base: default_api_base(),
                timeout_secs: default_client_timeout(),
            },
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logging: default_json_logging(),
                metrics_port: default_metrics_port(),
                service_name: default_service_name(),
            },
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_client_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.client.timeout_secs, 10);
        assert_eq!(config.identity.session_ttl_days, 7);
    }

    #[test]
    fn test_read_database_fallback() {
        let config = AppConfig::default();
        assert_eq!(config.read_database_url(), "postgres://localhost/wayfare");
    }

    #[test]
    fn test_client_timeout_duration() {
        let client = ClientConfig::default();
        assert_eq!(client.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_from_file_merges_defaults() {
        let dir = std::env::temp_dir().join(format!("wayfare-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9999

[database]
url = "postgres://localhost/wayfare_test"

[identity]
session_ttl_days = 14

[generator]

[client]

[observability]
"#,
        )
        .unwrap();

        let config = AppConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.identity.session_ttl_days, 14);
        assert_eq!(config.client.timeout_secs, 10);

        let _ = std::fs::remove_dir_all(dir);
    }
}
