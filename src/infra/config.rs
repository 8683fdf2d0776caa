//! Centralized configuration (TOML file + environment variables + defaults).
//!
//! Precedence, lowest first: built-in defaults, the optional config file, then `STUDENTS_*`
//! environment variables (nested keys use `__`, e.g. `STUDENTS_HTTP_SERVER__ADDRESS`).

use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Env var naming the config file when `--config` is not given.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const ENV_PREFIX: &str = "STUDENTS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("configuration validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Free-form deployment tag, only used in logs.
    #[serde(default = "default_env")]
    pub env: String,
    #[serde(default)]
    pub storage_path: String,
    #[serde(default)]
    pub http_server: HttpServer,
    /// How long in-flight requests may run after a shutdown signal.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpServer {
    /// `host:port` to bind.
    #[serde(default)]
    pub address: String,
}

fn default_env() -> String {
    "dev".to_string()
}

fn default_shutdown_grace_secs() -> u64 {
    5
}

impl Config {
    /// Loads configuration from `path` (or `$CONFIG_PATH`) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
        Self::from_sources(path.as_deref(), None)
    }

    /// Same as [`Config::load`] but reads environment overrides from `env` when given,
    /// instead of the process environment.
    pub fn from_sources(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            builder = builder.add_source(config::File::from(path.to_path_buf()));
        }

        let env_source = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let config = builder
            .add_source(env_source)
            .build()?
            .try_deserialize::<Config>()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.trim().is_empty() {
            return Err(ConfigError::Validation("storage_path must be set".to_string()));
        }
        if self.http_server.address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "http_server.address must be set".to_string(),
            ));
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.http_server.address.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "http_server.address '{}' is not a valid host:port: {}",
                self.http_server.address, e
            ))
        })
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
