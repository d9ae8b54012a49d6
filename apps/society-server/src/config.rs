//! Server configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. YAML file given with `--config`
//! 3. Environment variables: `SOCIETY__<SECTION>__<KEY>`

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Module configuration, including session token settings
    #[serde(default)]
    pub society_service: society_service::Config,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Upper bound for a single request, e.g. `30s`
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL, `sqlite://...` or `postgres://...`
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Document content storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings; `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_database_url() -> String {
    "sqlite://society-hub.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("data/documents")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load config with layered resolution (file → env).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.is_file() {
                return Err(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))
                .into());
            }
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed("SOCIETY__").split("__"))
            .extract()?;
        Ok(config)
    }
}
