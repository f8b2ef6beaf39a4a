//! Error handling for ChatFlow
//!
//! This module defines the main error type used throughout the crate
//! and provides a unified error handling strategy.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ChatFlow
#[derive(Error, Debug)]
pub enum ChatFlowError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Bot runs in stateless mode; conversation state is unavailable")]
    StatelessMode,

    #[error("Failed to read media file {path}: {source}")]
    MediaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for ChatFlow operations
pub type Result<T> = std::result::Result<T, ChatFlowError>;

impl ChatFlowError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ChatFlowError::Telegram(_) => true,
            ChatFlowError::Config(_) => false,
            ChatFlowError::ConfigLoad(_) => false,
            ChatFlowError::UserNotFound { .. } => false,
            ChatFlowError::StatelessMode => false,
            ChatFlowError::MediaRead { .. } => true,
            ChatFlowError::Handler(_) => true,
            ChatFlowError::Io(_) => true,
            ChatFlowError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ChatFlowError::Config(_) => ErrorSeverity::Critical,
            ChatFlowError::ConfigLoad(_) => ErrorSeverity::Critical,
            ChatFlowError::StatelessMode => ErrorSeverity::Warning,
            ChatFlowError::UserNotFound { .. } => ErrorSeverity::Warning,
            ChatFlowError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let missing = ChatFlowError::UserNotFound { user_id: 7 };
        assert!(!missing.is_recoverable());
        assert_eq!(missing.severity(), ErrorSeverity::Warning);
        assert_eq!(missing.to_string(), "User not found: 7");

        let media = ChatFlowError::MediaRead {
            path: PathBuf::from("uploads/cat.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(media.is_recoverable());
        assert_eq!(media.severity(), ErrorSeverity::Error);

        let config = ChatFlowError::Config("Bot token is required".to_string());
        assert!(!config.is_recoverable());
        assert_eq!(config.severity().to_string(), "CRITICAL");
    }
}
