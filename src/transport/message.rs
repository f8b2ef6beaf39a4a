//! Inbound message model

use serde::{Deserialize, Serialize};
use teloxide::types::Message;

/// A transport-neutral inbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i32,
    /// Chat the message arrived in; replies go here
    pub chat_id: i64,
    /// Sender identity, used as the state key
    pub user_id: i64,
    pub text: Option<String>,
    pub username: Option<String>,
}

impl IncomingMessage {
    /// Build a plain text message from a user in their private chat
    pub fn text_from(user_id: i64, text: impl Into<String>) -> Self {
        Self {
            message_id: 0,
            chat_id: user_id,
            user_id,
            text: Some(text.into()),
            username: None,
        }
    }

    /// Text payload, empty when the message carries none
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Whether the message has a text or command payload the bot can act on
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|text| !text.trim().is_empty())
    }
}

impl From<&Message> for IncomingMessage {
    fn from(msg: &Message) -> Self {
        let chat_id = msg.chat.id.0;
        // Channel posts carry no sender; the chat stands in for it.
        let user_id = msg
            .from
            .as_ref()
            .map(|user| user.id.0 as i64)
            .unwrap_or(chat_id);

        Self {
            message_id: msg.id.0,
            chat_id,
            user_id,
            text: msg.text().map(str::to_owned),
            username: msg.from.as_ref().and_then(|user| user.username.clone()),
        }
    }
}
