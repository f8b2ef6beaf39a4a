//! Outbound gateway module
//!
//! [`OutboundGateway`] is transport-agnostic; [`TelegramGateway`] implements
//! it via teloxide, [`MemoryGateway`] records sends in memory and
//! [`ChannelRouted`] redirects every send to one channel.

pub mod channel;
pub mod keyboard;
pub mod memory;
pub mod telegram;

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use async_trait::async_trait;
use teloxide::types::ParseMode;
use crate::utils::errors::{ChatFlowError, Result};

pub use channel::ChannelRouted;
pub use keyboard::reply_keyboard;
pub use memory::{MemoryGateway, Outbound};
pub use telegram::TelegramGateway;

/// Sends replies on behalf of handlers and external logic
#[async_trait]
pub trait OutboundGateway: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;
    /// Sends text rendered with the given markup mode.
    async fn send_rich_text(&self, chat_id: i64, text: &str, mode: FormatMode) -> Result<()>;
    /// Uploads a local file (relative to the uploads directory) as a photo or document.
    async fn send_media(&self, chat_id: i64, kind: MediaKind, path: &Path, caption: Option<&str>) -> Result<()>;
    /// Sends text with a reply keyboard, one button per row.
    async fn send_keyboard(&self, chat_id: i64, text: &str, buttons: &[String]) -> Result<()>;
}

#[async_trait]
impl<G: OutboundGateway + ?Sized> OutboundGateway for Arc<G> {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        (**self).send_text(chat_id, text).await
    }

    async fn send_rich_text(&self, chat_id: i64, text: &str, mode: FormatMode) -> Result<()> {
        (**self).send_rich_text(chat_id, text, mode).await
    }

    async fn send_media(&self, chat_id: i64, kind: MediaKind, path: &Path, caption: Option<&str>) -> Result<()> {
        (**self).send_media(chat_id, kind, path, caption).await
    }

    async fn send_keyboard(&self, chat_id: i64, text: &str, buttons: &[String]) -> Result<()> {
        (**self).send_keyboard(chat_id, text, buttons).await
    }
}

/// Text markup modes understood by the chat platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    Html,
    Markdown,
    MarkdownV2,
}

impl FromStr for FormatMode {
    type Err = ChatFlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(FormatMode::Html),
            "markdown" => Ok(FormatMode::Markdown),
            "markdownv2" => Ok(FormatMode::MarkdownV2),
            _ => Err(ChatFlowError::InvalidInput(format!("Unknown format mode: {}", s))),
        }
    }
}

impl From<FormatMode> for ParseMode {
    #[allow(deprecated)]
    fn from(mode: FormatMode) -> Self {
        match mode {
            FormatMode::Html => ParseMode::Html,
            FormatMode::Markdown => ParseMode::Markdown,
            FormatMode::MarkdownV2 => ParseMode::MarkdownV2,
        }
    }
}

/// How an uploaded file is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Document,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Document => "document",
        }
    }
}
