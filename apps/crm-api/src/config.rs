//! CRM API configuration module.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! ```text
//! built-in defaults
//!      │
//!      ▼
//! crm.toml (or the file named by CRM_CONFIG), optional
//!      │
//!      ▼
//! CRM_* environment variables (CRM_PORT, CRM_DATABASE_PATH, ...)
//! ```

use std::env;
use std::net::SocketAddr;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "crm.toml";

/// Which store implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// SQLite file (or `:memory:`) via sqlx.
    Sqlite,
    /// Process memory; everything is lost on exit.
    Memory,
}

/// CRM API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// Store implementation
    pub store: StoreBackend,

    /// SQLite database file (`:memory:` for an ephemeral database)
    pub database_path: String,

    /// Maximum pooled SQLite connections
    pub max_connections: u32,

    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
}

impl ApiConfig {
    /// Load configuration from defaults, the config file and `CRM_*`
    /// environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("CRM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let settings = Self::defaults()?
            .add_source(File::with_name(&path).required(false))
            .add_source(Environment::with_prefix("CRM").try_parsing(true))
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from defaults plus a TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let settings = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(settings)
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("host".to_string()))
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8000)?
            .set_default("store", "sqlite")?
            .set_default("database_path", "./crm.db")?
            .set_default("max_connections", 5)?
            .set_default("log_level", "info")?)
    }

    fn finish(settings: Config) -> Result<Self, ConfigError> {
        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }
        if self.store == StoreBackend::Sqlite && self.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_toml("").unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.database_path, "./crm.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.bind_addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = ApiConfig::from_toml(
            r#"
            port = 9090
            store = "memory"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ApiConfig::from_toml("max_connections = 0"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            ApiConfig::from_toml("database_path = \"\""),
            Err(ConfigError::MissingRequired(_))
        ));
        assert!(matches!(
            ApiConfig::from_toml("store = \"postgres\""),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_bad_host() {
        let config = ApiConfig::from_toml("host = \"not a host\"").unwrap();
        assert!(config.bind_addr().is_err());
    }
}
