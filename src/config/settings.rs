//! Configuration settings for the Dear Days conversion service.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted for the service key when the config file
/// does not carry one.
pub const SERVICE_KEY_ENV: &str = "DEARDAYS_SERVICE_KEY";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub lunar_api: LunarApiConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("config.toml"),
            PathBuf::from("deardays.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("deardays/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".deardays/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.lunar_api.base_url.is_empty() {
            return Err(ConfigError::MissingField("lunar_api.base_url".to_string()).into());
        }
        if self.lunar_api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("lunar_api.timeout_secs must be > 0".to_string()).into());
        }
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port the REST API listens on.
    pub http_port: u16,
    /// Enable CORS.
    pub enable_cors: bool,
    /// Allowed origins for CORS.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8020,
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// External lunar-calendar data service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LunarApiConfig {
    /// Base URL of the lunar-calendar open-data service.
    pub base_url: String,
    /// Service authentication key. Falls back to the `DEARDAYS_SERVICE_KEY`
    /// environment variable when empty.
    pub service_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LunarApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://apis.data.go.kr/B090041/openapi/service/LrsrCldInfoService"
                .to_string(),
            service_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl LunarApiConfig {
    /// Resolve the service key from the config or the environment.
    ///
    /// The key is resolved once, at client construction; nothing reads
    /// process-wide state at call time.
    pub fn resolve_service_key(&self) -> Result<String> {
        if !self.service_key.is_empty() {
            return Ok(self.service_key.clone());
        }
        std::env::var(SERVICE_KEY_ENV).map_err(|_| {
            ConfigError::MissingField(format!(
                "lunar_api.service_key (or {} env var)",
                SERVICE_KEY_ENV
            ))
            .into()
        })
    }
}
