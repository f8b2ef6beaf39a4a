//! Test data helpers for creating test objects
//!
//! This module provides helper functions for creating bot configurations
//! and inbound messages.

use ChatFlow::config::BotConfig;
use ChatFlow::IncomingMessage;

/// Helper function to create a test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

/// Helper function to create test chat ID
pub fn test_chat_id() -> i64 {
    987654321
}

/// Helper function to create test user ID
pub fn test_user_id() -> i64 {
    987654321
}

/// Helper function to create test channel ID
pub fn test_channel_id() -> i64 {
    -1001234567890
}

/// Configuration of a stateful bot with no filters or overrides
pub fn stateful_config() -> BotConfig {
    BotConfig {
        token: test_bot_token(),
        use_state: true,
        ..BotConfig::default()
    }
}

/// Configuration of an outbound-only bot
pub fn stateless_config() -> BotConfig {
    BotConfig {
        token: test_bot_token(),
        use_state: false,
        ..BotConfig::default()
    }
}

/// A private-chat text message from `user_id`
pub fn text_message(user_id: i64, text: &str) -> IncomingMessage {
    IncomingMessage::text_from(user_id, text)
}

/// A message without any text payload (e.g. a sticker)
pub fn media_only_message(user_id: i64) -> IncomingMessage {
    IncomingMessage {
        text: None,
        ..IncomingMessage::text_from(user_id, "")
    }
}
