//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the bot runtime.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::utils::errors::{ChatFlowError, Result};

/// Initialize logging based on configuration.
///
/// `verbose` mirrors the bot's debug flag and turns on verbose transport logging.
/// The returned guard must be kept alive for the file writer to flush.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(&config.level, verbose)?;

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "chatflow.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let json_layer = config.json.then(|| tracing_subscriber::fmt::layer().json());
    let text_layer = (!config.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ChatFlowError::Config(format!("Failed to install log subscriber: {}", e)))?;

    info!(level = %config.level, verbose = verbose, "Logging initialized");
    Ok(guard)
}

/// Build the env filter for the configured level
pub fn build_filter(level: &str, verbose: bool) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(level)
        .map_err(|e| ChatFlowError::Config(format!("Invalid log level '{}': {}", level, e)))?;

    if verbose {
        for directive in ["teloxide=debug", "ChatFlow=debug"] {
            let directive = directive
                .parse()
                .map_err(|e| ChatFlowError::Config(format!("Invalid log directive: {}", e)))?;
            filter = filter.add_directive(directive);
        }
    }

    Ok(filter)
}

/// Log a state transition for a user
pub fn log_state_transition(user_id: i64, from: &str, to: &str) {
    info!(
        user_id = user_id,
        from = from,
        to = to,
        "User state transition"
    );
}

/// Log a message that had no handler bound to the user's state
pub fn log_routing_miss(user_id: i64, state: &str) {
    warn!(
        user_id = user_id,
        state = state,
        "No handler found for state"
    );
}

/// Log an outbound send
pub fn log_outbound(chat_id: i64, kind: &str) {
    debug!(
        chat_id = chat_id,
        kind = kind,
        "Outbound message sent"
    );
}
