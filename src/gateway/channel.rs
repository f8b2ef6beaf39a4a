//! Channel override
//!
//! When a channel is configured, every send goes to it instead of the chat
//! the caller asked for.

use std::path::Path;
use async_trait::async_trait;
use tracing::trace;
use crate::utils::errors::Result;
use super::{FormatMode, MediaKind, OutboundGateway};

/// Redirects all sends of the wrapped gateway to a fixed channel
pub struct ChannelRouted<G> {
    inner: G,
    channel_id: i64,
}

impl<G: OutboundGateway> ChannelRouted<G> {
    /// Wrap `inner`; a `channel_id` of `0` disables the override
    pub fn new(inner: G, channel_id: i64) -> Self {
        Self { inner, channel_id }
    }

    pub fn is_active(&self) -> bool {
        self.channel_id != 0
    }

    /// Destination actually used for a send requested to `chat_id`
    pub fn destination(&self, chat_id: i64) -> i64 {
        if self.is_active() {
            if chat_id != self.channel_id {
                trace!(requested = chat_id, channel_id = self.channel_id, "Redirecting send to channel");
            }
            self.channel_id
        } else {
            chat_id
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: OutboundGateway> OutboundGateway for ChannelRouted<G> {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.inner.send_text(self.destination(chat_id), text).await
    }

    async fn send_rich_text(&self, chat_id: i64, text: &str, mode: FormatMode) -> Result<()> {
        self.inner.send_rich_text(self.destination(chat_id), text, mode).await
    }

    async fn send_media(&self, chat_id: i64, kind: MediaKind, path: &Path, caption: Option<&str>) -> Result<()> {
        self.inner.send_media(self.destination(chat_id), kind, path, caption).await
    }

    async fn send_keyboard(&self, chat_id: i64, text: &str, buttons: &[String]) -> Result<()> {
        self.inner.send_keyboard(self.destination(chat_id), text, buttons).await
    }
}
