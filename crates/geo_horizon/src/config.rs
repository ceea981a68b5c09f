//! Configuration management for the Geo Horizon server.
//!
//! This module handles loading, validation, and conversion of server configuration
//! from TOML files and command-line arguments.

use game_server::ServerConfig;
use point_index::IndexConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Application configuration loaded from TOML file.
///
/// This is the main configuration structure that encompasses all server settings
/// including networking, index tuning, logging, and monitoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Point index tuning
    #[serde(default)]
    pub index: IndexConfig,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Periodic statistics reporting
    #[serde(default)]
    pub monitoring: MonitoringSettings,
}

/// Server-specific configuration settings.
///
/// Controls network binding and the request limits enforced by the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Network address to bind the server to (e.g., "127.0.0.1:8080")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Maximum accepted game or point name length in bytes
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_max_name_length() -> usize {
    1024
}

/// Logging system configuration.
///
/// Controls log output format and level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Monitoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSettings {
    /// Seconds between index statistics reports (0 to disable)
    #[serde(default = "default_stats_interval_secs")]
    pub stats_interval_secs: u64,
}

fn default_stats_interval_secs() -> u64 {
    60
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_body_bytes: default_max_body_bytes(),
            max_name_length: default_max_name_length(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            stats_interval_secs: default_stats_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, creates a default configuration file at the specified path
    /// and returns the default configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The loaded `AppConfig`, or an error if the file could not be read,
    /// parsed, or created.
    pub async fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Create default config file
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Converts the application configuration to a game server configuration.
    pub fn to_server_config(&self) -> Result<ServerConfig, Box<dyn std::error::Error>> {
        Ok(ServerConfig {
            bind_address: self.server.bind_address.parse()?,
            max_body_bytes: self.server.max_body_bytes,
            max_name_length: self.server.max_name_length,
            index: self.index,
        })
    }

    /// Validates the configuration, returning a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!(
                "Invalid bind address: {}",
                &self.server.bind_address
            ));
        }

        if self.server.max_body_bytes == 0 {
            return Err("server.max_body_bytes must be greater than 0".to_string());
        }

        if self.server.max_name_length == 0 {
            return Err("server.max_name_length must be greater than 0".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }
}
