//! Owner-only access middleware
//!
//! When a bot is configured to answer only its owner, messages from anyone
//! else are dropped before they reach the dispatcher.

use tracing::debug;
use crate::config::BotConfig;
use crate::transport::IncomingMessage;

/// Single-owner access filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerFilter {
    owner_id: Option<i64>,
}

impl OwnerFilter {
    /// Build the filter from bot configuration.
    ///
    /// Active only with `answer_only_to_owner` set and a non-zero `owner_id`.
    pub fn new(config: &BotConfig) -> Self {
        let owner_id = (config.answer_only_to_owner && config.owner_id != 0).then_some(config.owner_id);
        Self { owner_id }
    }

    /// A filter that lets every message through
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.owner_id.is_some()
    }

    /// Check if user is the owner
    pub fn is_owner(&self, user_id: i64) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Check whether the message may be dispatched
    pub fn allows(&self, message: &IncomingMessage) -> bool {
        match self.owner_id {
            None => true,
            Some(owner_id) if owner_id == message.user_id => true,
            Some(_) => {
                debug!(user_id = message.user_id, chat_id = message.chat_id, "Ignoring message from non-owner");
                false
            }
        }
    }
}
