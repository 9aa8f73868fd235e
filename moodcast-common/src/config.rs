//! Configuration loading and API key resolution
//!
//! Configuration comes from two tiers:
//! 1. Environment variables (highest priority)
//! 2. TOML config file
//!
//! A missing TOML file is not fatal: the service logs a warning and starts
//! with defaults. Missing API keys are not fatal either; the provider that
//! needs the key reports a failure when it is called.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "moodcast";

/// Config file name inside [`APP_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// TOML configuration file contents
///
/// Every field is optional so that a partial file (or none at all) still
/// produces a usable configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    /// OpenWeatherMap API key
    #[serde(default)]
    pub openweather_api_key: Option<String>,

    /// Google Gemini API key
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name (e.g. "gemini-1.5-flash")
    #[serde(default)]
    pub gemini_model: Option<String>,

    /// Last.fm API key
    #[serde(default)]
    pub lastfm_api_key: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging section of the TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// tracing-subscriber filter directive (e.g. "info", "moodcast_rec=debug")
    #[serde(default)]
    pub level: Option<String>,
}

/// External API keys the recommendation service knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyKind {
    OpenWeather,
    Gemini,
    LastFm,
}

impl ApiKeyKind {
    /// Environment variable consulted for this key
    pub fn env_var(self) -> &'static str {
        match self {
            ApiKeyKind::OpenWeather => "OWM_API_KEY",
            ApiKeyKind::Gemini => "GEMINI_API_KEY",
            ApiKeyKind::LastFm => "LASTFM_API_KEY",
        }
    }

    /// Human-readable service name for log messages
    pub fn service_name(self) -> &'static str {
        match self {
            ApiKeyKind::OpenWeather => "OpenWeatherMap",
            ApiKeyKind::Gemini => "Gemini",
            ApiKeyKind::LastFm => "Last.fm",
        }
    }

    fn toml_value(self, config: &TomlConfig) -> Option<&String> {
        match self {
            ApiKeyKind::OpenWeather => config.openweather_api_key.as_ref(),
            ApiKeyKind::Gemini => config.gemini_api_key.as_ref(),
            ApiKeyKind::LastFm => config.lastfm_api_key.as_ref(),
        }
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve an API key from the environment and TOML tiers
///
/// **Priority:** ENV → TOML
///
/// Returns `None` when neither tier holds a valid key.
pub fn resolve_api_key(kind: ApiKeyKind, toml_config: &TomlConfig) -> Option<String> {
    let env_key = std::env::var(kind.env_var())
        .ok()
        .filter(|key| is_valid_key(key));
    let toml_key = kind.toml_value(toml_config).filter(|key| is_valid_key(key));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "{} API key found in both environment and TOML. Using environment (highest priority).",
            kind.service_name()
        );
    }

    if let Some(key) = env_key {
        info!("{} API key loaded from environment variable", kind.service_name());
        return Some(key.trim().to_string());
    }

    if let Some(key) = toml_key {
        info!("{} API key loaded from TOML config", kind.service_name());
        return Some(key.trim().to_string());
    }

    warn!(
        "{} API key not configured. Set {} or add it to {}",
        kind.service_name(),
        kind.env_var(),
        CONFIG_FILE_NAME
    );
    None
}

/// Default config file location for the platform
///
/// `~/.config/moodcast/config.toml` on Linux, the equivalent per-user config
/// directory elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load TOML configuration
///
/// With an explicit path the file must exist. Without one, the platform
/// default is tried and a missing file falls back to defaults.
pub fn load_toml_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit_path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            Some(path) => {
                warn!(
                    "Config file not found at {}, using defaults",
                    path.display()
                );
                return Ok(TomlConfig::default());
            }
            None => {
                warn!("Could not determine config directory, using defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config = parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Parse TOML configuration text
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}
