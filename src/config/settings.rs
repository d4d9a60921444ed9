use crate::utils::error::{Result, WatchError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://carapicuiba.demandadealunos.com/";
pub const DEFAULT_STATE_FILE: &str = "last_position.txt";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(WatchError::InvalidConfigValueError {
                field: "log_format".to_string(),
                value: other.to_string(),
                reason: "expected 'compact' or 'json'".to_string(),
            }),
        }
    }
}

/// Non-secret tunables. Every key is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    pub base_url: String,
    pub state_file: String,
    pub timeout_seconds: u64,
    pub telegram_api_base: String,
    pub log_format: LogFormat,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            state_file: DEFAULT_STATE_FILE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl WatchSettings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| WatchError::ConfigError {
            message: format!("failed to read settings file {}: {}", path.display(), e),
        })?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| WatchError::ConfigError {
            message: format!("failed to parse settings TOML: {}", e),
        })
    }
}
