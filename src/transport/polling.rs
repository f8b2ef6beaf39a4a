//! Telegram long-polling update source

use std::collections::VecDeque;
use std::time::Duration;
use async_trait::async_trait;
use teloxide::{
    Bot,
    payloads::GetUpdatesSetters,
    prelude::*,
    types::{AllowedUpdate, UpdateKind},
};
use tracing::{debug, warn};
use super::{IncomingMessage, UpdateSource};

/// Pause after a failed `getUpdates` call
const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Reads messages with `getUpdates`, tracking the offset between polls
pub struct TelegramPolling {
    bot: Bot,
    offset: i32,
    timeout: u32,
    buffer: VecDeque<IncomingMessage>,
}

impl TelegramPolling {
    /// Create a poller with the given long-polling timeout (seconds)
    pub fn new(bot: Bot, timeout: u32) -> Self {
        Self {
            bot,
            offset: 0,
            timeout,
            buffer: VecDeque::new(),
        }
    }

    async fn poll(&mut self) -> Result<(), teloxide::RequestError> {
        let updates = self
            .bot
            .get_updates()
            .offset(self.offset)
            .timeout(self.timeout)
            .allowed_updates(vec![AllowedUpdate::Message])
            .await?;

        for update in updates {
            self.offset = update.id.0 as i32 + 1;
            match update.kind {
                UpdateKind::Message(ref message) => self.buffer.push_back(IncomingMessage::from(message)),
                _ => debug!(update_id = update.id.0, "Skipping non-message update"),
            }
        }

        Ok(())
    }
}

#[async_trait]
impl UpdateSource for TelegramPolling {
    async fn next_message(&mut self) -> Option<IncomingMessage> {
        loop {
            if let Some(message) = self.buffer.pop_front() {
                return Some(message);
            }

            if let Err(e) = self.poll().await {
                warn!(error = %e, "Failed to get updates, retrying in {:?}", RETRY_DELAY);
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
