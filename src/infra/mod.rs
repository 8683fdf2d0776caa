pub mod config;
pub mod telemetry;

pub use self::config::{Config, ConfigError};
