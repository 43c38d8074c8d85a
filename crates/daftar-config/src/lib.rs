//! Configuration management for daftar
//!
//! This module handles loading, validation, and management of
//! daftar configuration from YAML files.

pub mod error;

use daftar_calendar::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the data directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Ledger file name (YAML or JSON)
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            ledger_file: default_ledger_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_ledger_file() -> String {
    "ledger.yaml".to_string()
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    /// Locale used for month names and digits
    #[serde(default)]
    pub locale: Locale,
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Number of Jalali months in the dashboard trend
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,
    /// Number of expense categories kept in the distribution
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
    /// Category used for expenses recorded without one
    #[serde(default = "default_other_category")]
    pub other_category: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            trend_months: default_trend_months(),
            top_categories: default_top_categories(),
            other_category: default_other_category(),
        }
    }
}

fn default_trend_months() -> u32 {
    6
}

fn default_top_categories() -> usize {
    8
}

fn default_other_category() -> String {
    "سایر".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Report settings
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.reports.trend_months == 0 || self.reports.trend_months > 24 {
            return Err(ConfigError::InvalidValue {
                field: "reports.trend_months".to_string(),
                reason: "Trend months must be between 1 and 24".to_string(),
            });
        }

        if self.reports.top_categories == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reports.top_categories".to_string(),
                reason: "At least one category must be shown".to_string(),
            });
        }

        if self.reports.other_category.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "reports.other_category".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.data.path.join(&self.data.ledger_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::ConfigErrorCode;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.display.locale, Locale::Fa);
        assert_eq!(config.reports.trend_months, 6);
        assert_eq!(config.reports.top_categories, 8);
        assert_eq!(config.reports.other_category, "سایر");
        assert_eq!(config.ledger_path(), PathBuf::from("./data/ledger.yaml"));
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_yaml("display:\n  locale: en\nreports:\n  top_categories: 5\n").unwrap();
        assert_eq!(config.display.locale, Locale::En);
        assert_eq!(config.reports.top_categories, 5);
        assert_eq!(config.reports.trend_months, 6);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);

        let err = Config::from_yaml("reports:\n  trend_months: 30\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);

        let err = Config::from_yaml("reports:\n  other_category: ''\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::MissingField);
    }

    #[test]
    fn test_bad_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);

        let err = Config::from_yaml("display:\n  locale: de\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/daftar.yaml").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
    }
}
