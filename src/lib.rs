//! ChatFlow Telegram Bot
//!
//! A Telegram bot front end that routes every inbound message to the handler
//! bound to its sender's current conversation state. This library provides
//! the per-user state store, the handler registry and dispatcher, the update
//! loop, and an outbound gateway with an optional broadcast channel override.

#![allow(non_snake_case)]

pub mod bot;
pub mod config;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ChatFlowError, Result};

// Re-export main components for easy access
pub use bot::{BotContext, BotMode, StateBot};
pub use gateway::{FormatMode, MediaKind, OutboundGateway};
pub use handlers::StateHandler;
pub use state::{StateManager, StateStore, UserState};
pub use transport::{IncomingMessage, UpdateSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
