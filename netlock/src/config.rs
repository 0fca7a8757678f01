//! Configuration loading
//!
//! Settings are read once at startup from a TOML file and are immutable
//! afterwards. The `[serial]` section is the only one the core requires;
//! `[server]` belongs to the HTTP collaborator and only rides along here so
//! a single file configures the whole process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::link::ReconnectPolicy;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file {0:?} not found")]
    NotFound(PathBuf),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Process configuration
///
/// # Example file
///
/// ```toml
/// [serial]
/// port = "/dev/ttyUSB0"
/// baud_rate = 9600
///
/// [server]
/// host = "0.0.0.0"
/// port = 5000
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub serial: SerialConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Serial link settings
#[derive(Debug, Clone, Deserialize)]
pub struct SerialConfig {
    /// Serial port path (e.g., "/dev/ttyUSB0")
    pub port: String,

    /// Baud rate of the lock-controller bus
    pub baud_rate: u32,

    /// Read timeout in milliseconds; must be non-zero
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Interval between background reconnect checks, in seconds
    #[serde(default = "default_reconnect_interval_secs")]
    pub reconnect_interval_secs: u64,

    /// Reconnect policy ("fail-fast" or the legacy "fail-soft")
    #[serde(default)]
    pub policy: ReconnectPolicy,
}

/// Bind address for the HTTP collaborator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

fn default_read_timeout_ms() -> u64 {
    netlock_core::constants::DEFAULT_READ_TIMEOUT * 1000
}

fn default_reconnect_interval_secs() -> u64 {
    netlock_core::constants::DEFAULT_RECONNECT_INTERVAL
}

impl SerialConfig {
    /// Read timeout as a `Duration`
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Reconnect interval as a `Duration`
    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_secs(self.reconnect_interval_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or fails to
    /// parse (including a missing `[serial]` section).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_minimal() {
        let config = Config::from_toml(
            r#"
            [serial]
            port = "/dev/ttyUSB0"
            baud_rate = 9600
            "#,
        )
        .unwrap();

        assert_eq!(config.serial.port, "/dev/ttyUSB0");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.read_timeout(), Duration::from_secs(1));
        assert_eq!(config.serial.reconnect_interval(), Duration::from_secs(5));
        assert_eq!(config.serial.policy, ReconnectPolicy::FailFast);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_config_full() {
        let config = Config::from_toml(
            r#"
            [serial]
            port = "/dev/ttyS3"
            baud_rate = 115200
            read_timeout_ms = 250
            reconnect_interval_secs = 2
            policy = "fail-soft"

            [server]
            host = "127.0.0.1"
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.serial.read_timeout(), Duration::from_millis(250));
        assert_eq!(config.serial.reconnect_interval(), Duration::from_secs(2));
        assert_eq!(config.serial.policy, ReconnectPolicy::FailSoft);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_missing_serial_section() {
        let result = Config::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            "#,
        );

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_missing_file() {
        let result = Config::load("/nonexistent/app.toml");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
