pub mod settings;

pub use settings::{LogFormat, WatchSettings};

use crate::utils::error::{Result, WatchError};
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_NE: &str = "CRECHE_NE";
pub const ENV_DA: &str = "CRECHE_DA";
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_CONFIG_FILE: &str = "CRECHE_CONFIG";
pub const ENV_BASE_URL: &str = "CRECHE_BASE_URL";
pub const ENV_STATE_FILE: &str = "CRECHE_STATE_FILE";
pub const ENV_TIMEOUT_SECONDS: &str = "CRECHE_TIMEOUT_SECONDS";
pub const ENV_TELEGRAM_API_BASE: &str = "TELEGRAM_API_BASE";
pub const ENV_LOG_FORMAT: &str = "CRECHE_LOG_FORMAT";

#[derive(Clone)]
pub struct WatchConfig {
    /// Sent as the `ne` form field.
    pub ne: String,
    /// Sent as the `da` form field.
    pub da: String,
    pub bot_token: String,
    pub chat_id: String,
    pub settings: WatchSettings,
}

impl fmt::Debug for WatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchConfig")
            .field("ne", &self.ne)
            .field("da", &self.da)
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("settings", &self.settings)
            .finish()
    }
}

impl WatchConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so callers need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ne = validation::require_value(ENV_NE, lookup(ENV_NE))?;
        let da = validation::require_value(ENV_DA, lookup(ENV_DA))?;
        let bot_token = validation::require_value(ENV_BOT_TOKEN, lookup(ENV_BOT_TOKEN))?;
        let chat_id = validation::require_value(ENV_CHAT_ID, lookup(ENV_CHAT_ID))?;

        let mut settings = match lookup(ENV_CONFIG_FILE) {
            Some(path) => WatchSettings::from_file(path)?,
            None => WatchSettings::default(),
        };

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            settings.base_url = base_url;
        }
        if let Some(state_file) = lookup(ENV_STATE_FILE) {
            settings.state_file = state_file;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECONDS) {
            settings.timeout_seconds =
                timeout
                    .trim()
                    .parse()
                    .map_err(|_| WatchError::InvalidConfigValueError {
                        field: ENV_TIMEOUT_SECONDS.to_string(),
                        value: timeout.clone(),
                        reason: "expected a whole number of seconds".to_string(),
                    })?;
        }
        if let Some(api_base) = lookup(ENV_TELEGRAM_API_BASE) {
            settings.telegram_api_base = api_base;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            settings.log_format = format.parse()?;
        }

        let config = Self {
            ne,
            da,
            bot_token,
            chat_id,
            settings,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.settings.timeout_seconds)
    }

    pub fn state_file(&self) -> PathBuf {
        PathBuf::from(&self.settings.state_file)
    }
}

impl Validate for WatchConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.settings.base_url)?;
        validation::validate_url("telegram_api_base", &self.settings.telegram_api_base)?;
        validation::validate_path("state_file", &self.settings.state_file)?;
        validation::validate_range("timeout_seconds", self.settings.timeout_seconds, 1, 300)?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
