//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `CHATFLOW__BOT__TOKEN`
pub const ENV_PREFIX: &str = "CHATFLOW";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    /// Bot API credential
    pub token: String,
    /// Verbose transport logging
    #[serde(default)]
    pub debug: bool,
    /// Owner identity; `0` means unset
    #[serde(default)]
    pub owner_id: i64,
    /// Broadcast destination overriding every outbound chat; `0` means unset
    #[serde(default)]
    pub channel_id: i64,
    /// Consume inbound updates and dispatch by state
    #[serde(default)]
    pub use_state: bool,
    /// Ignore everyone but the owner. No effect while `owner_id` is `0`.
    #[serde(default)]
    pub answer_only_to_owner: bool,
    /// Custom Bot API server
    #[serde(default)]
    pub api_url: Option<String>,
    /// Long-polling timeout in seconds
    #[serde(default = "default_polling_timeout")]
    pub polling_timeout: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub json: bool,
}

/// Media uploads configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadsConfig {
    /// Directory media paths are resolved against
    pub dir: String,
}

fn default_polling_timeout() -> u32 {
    60
}

impl Settings {
    /// Load settings from `config.toml` (optional) and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load("config")
    }

    /// Load settings from the given file (extension optional) and environment variables
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ChatFlowError> {
        super::validation::validate_settings(self)
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            debug: false,
            owner_id: 0,
            channel_id: 0,
            use_state: false,
            answer_only_to_owner: false,
            api_url: None,
            polling_timeout: default_polling_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: "uploads".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            logging: LoggingConfig::default(),
            uploads: UploadsConfig::default(),
        }
    }
}
