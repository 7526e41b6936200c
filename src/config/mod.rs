//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::{Validate, ValidationError};

/// Environment variable naming the YAML configuration file
pub const CONFIG_ENV: &str = "INVOICING_CONFIG";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:3000"
    #[validate(length(min = 1))]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Invoice views
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InvoicesConfig {
    /// Listing path; invalidated and redirected to after writes
    #[validate(custom(function = "absolute_path"))]
    pub list_path: String,

    /// Distinct search listings cached per path before the oldest is evicted
    #[validate(range(min = 1, max = 4096))]
    pub max_cached_queries: usize,
}

impl Default for InvoicesConfig {
    fn default() -> Self {
        Self {
            list_path: crate::actions::INVOICES_PATH.to_string(),
            max_cached_queries: crate::server::cache::DEFAULT_MAX_QUERIES,
        }
    }
}

/// Search input behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before the URL is rewritten, in milliseconds
    #[validate(range(min = 1, max = 10000))]
    pub quiet_period_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: 300,
        }
    }
}

impl SearchConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

/// Relational store connection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL; the in-memory store is used when absent
    #[serde(default)]
    pub url: Option<String>,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    #[serde(default)]
    #[validate(nested)]
    pub invoices: InvoicesConfig,

    #[serde(default)]
    #[validate(nested)]
    pub search: SearchConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                source_name: path.to_string(),
                message,
            },
            other => other,
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `INVOICING_CONFIG`, or use defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_yaml_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

fn absolute_path(path: &str) -> Result<(), ValidationError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(ValidationError::new("absolute_path"))
    }
}
