//! Configuration management for the glossa translation engine
//!
//! Configuration is loaded from environment variables (`GLOSSA_` prefix)
//! or a TOML file, validated, and handed to the session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::popup::DEFAULT_BREAKPOINT_PX;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dictionary endpoint configuration
    pub endpoints: EndpointsConfig,

    /// Preference storage configuration
    pub storage: StorageConfig,

    /// UI behavior configuration
    pub ui: UiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Dictionary endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Base URL the candidate dictionary paths are resolved against
    pub base_url: String,

    /// Request timeout in seconds; 0 disables the timeout (the default —
    /// a hung fetch stalls only its own switch)
    pub request_timeout_secs: u64,
}

/// Preference storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the persisted language preference file
    pub preference_path: PathBuf,
}

/// UI behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Viewport width below which tabs open the mobile popup
    pub popup_breakpoint_px: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("GLOSSA_BASE_URL")
            .unwrap_or_else(|_| String::from("http://localhost:8080"));

        let request_timeout_secs = std::env::var("GLOSSA_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let preference_path = std::env::var("GLOSSA_PREF_PATH")
            .unwrap_or_else(|_| String::from("data/language"))
            .into();

        let popup_breakpoint_px = std::env::var("GLOSSA_POPUP_BREAKPOINT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_BREAKPOINT_PX);

        let level = std::env::var("GLOSSA_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let format = std::env::var("GLOSSA_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            endpoints: EndpointsConfig {
                base_url,
                request_timeout_secs,
            },
            storage: StorageConfig { preference_path },
            ui: UiConfig {
                popup_breakpoint_px,
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.endpoints.base_url.is_empty() {
            anyhow::bail!("base_url must not be empty");
        }

        url::Url::parse(&self.endpoints.base_url)
            .with_context(|| format!("invalid base_url: {}", self.endpoints.base_url))?;

        if self.ui.popup_breakpoint_px == 0 {
            anyhow::bail!("popup_breakpoint_px must be greater than 0");
        }

        Ok(())
    }

    /// Get the request timeout as a Duration, `None` meaning unbounded
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.endpoints.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: EndpointsConfig {
                base_url: String::from("http://localhost:8080"),
                request_timeout_secs: 0,
            },
            storage: StorageConfig {
                preference_path: PathBuf::from("data/language"),
            },
            ui: UiConfig {
                popup_breakpoint_px: DEFAULT_BREAKPOINT_PX,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
