use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// First order ID handed out after startup. Raise it when restarting
    /// against an engine that still holds orders from a previous run.
    #[serde(default = "default_order_id_start")]
    pub order_id_start: u64,
}

/// Downstream matching engine
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_order_id_start() -> u64 {
    1
}

fn default_timeout_ms() -> u64 {
    5000
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        Self::from_file(format!("config/{}.yaml", env))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.order_id_start == 0 {
            return Err(ConfigError::Invalid(
                "gateway.order_id_start must be at least 1 (0 is the unset order id)".into(),
            ));
        }
        if self.engine.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "engine.timeout_ms must be greater than zero".into(),
            ));
        }
        reqwest::Url::parse(&self.engine.base_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "engine.base_url '{}' is not a valid URL: {}",
                self.engine.base_url, e
            ))
        })?;
        Ok(())
    }
}
