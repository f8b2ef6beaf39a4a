//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use tracing::warn;
use crate::utils::errors::{ChatFlowError, Result};
use crate::utils::logging::build_filter;
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_logging_config(&settings.logging)?;
    validate_uploads_config(&settings.uploads)?;

    Ok(())
}

/// Validate bot configuration
pub fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.trim().is_empty() {
        return Err(ChatFlowError::Config(
            "Bot token is required".to_string()
        ));
    }

    if !config.token.contains(':') {
        return Err(ChatFlowError::Config(
            "Bot token must have the form '<bot id>:<secret>'".to_string()
        ));
    }

    if let Some(ref api_url) = config.api_url {
        url::Url::parse(api_url).map_err(|e| {
            ChatFlowError::Config(format!("Invalid Bot API URL '{}': {}", api_url, e))
        })?;
    }

    if config.polling_timeout == 0 {
        return Err(ChatFlowError::Config(
            "Polling timeout must be greater than 0".to_string()
        ));
    }

    if config.answer_only_to_owner && config.owner_id == 0 {
        warn!("answer_only_to_owner is set without owner_id; the owner filter stays disabled");
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ChatFlowError::Config(
            "Log level is required".to_string()
        ));
    }

    build_filter(&config.level, false)?;

    Ok(())
}

/// Validate uploads configuration
fn validate_uploads_config(config: &super::UploadsConfig) -> Result<()> {
    if config.dir.trim().is_empty() {
        return Err(ChatFlowError::Config(
            "Uploads directory is required".to_string()
        ));
    }

    Ok(())
}
