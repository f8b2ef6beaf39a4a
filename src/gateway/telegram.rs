//! Teloxide-based outbound gateway

use std::path::{Component, Path, PathBuf};
use async_trait::async_trait;
use teloxide::{
    Bot,
    payloads::{SendDocumentSetters, SendMessageSetters, SendPhotoSetters},
    prelude::*,
    types::{ChatId, InputFile, ParseMode},
};
use tracing::debug;
use crate::utils::errors::{ChatFlowError, Result};
use crate::utils::logging::log_outbound;
use super::{reply_keyboard, FormatMode, MediaKind, OutboundGateway};

/// Sends through the Telegram Bot API
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
    uploads_dir: PathBuf,
}

impl TelegramGateway {
    /// Create a gateway resolving media paths against `uploads_dir`
    pub fn new(bot: Bot, uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            bot,
            uploads_dir: uploads_dir.into(),
        }
    }

    /// Resolve a media path inside the uploads directory.
    ///
    /// Only plain relative paths are accepted; absolute paths and `..`
    /// components could reach files outside the directory.
    pub fn resolve_upload(&self, path: &Path) -> Result<PathBuf> {
        let escapes = path
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
        if escapes || path.as_os_str().is_empty() {
            return Err(ChatFlowError::InvalidInput(format!(
                "Media path must be relative to the uploads directory: {}",
                path.display()
            )));
        }

        Ok(self.uploads_dir.join(path))
    }

    /// Read an upload into memory
    async fn load_upload(&self, path: &Path) -> Result<InputFile> {
        let full_path = self.resolve_upload(path)?;
        let bytes = tokio::fs::read(&full_path).await.map_err(|source| ChatFlowError::MediaRead {
            path: full_path.clone(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        debug!(path = %full_path.display(), size = bytes.len(), "Loaded upload");

        Ok(InputFile::memory(bytes).file_name(file_name))
    }
}

#[async_trait]
impl OutboundGateway for TelegramGateway {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot.send_message(ChatId(chat_id), text).await?;
        log_outbound(chat_id, "text");
        Ok(())
    }

    async fn send_rich_text(&self, chat_id: i64, text: &str, mode: FormatMode) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::from(mode))
            .await?;
        log_outbound(chat_id, "rich_text");
        Ok(())
    }

    async fn send_media(&self, chat_id: i64, kind: MediaKind, path: &Path, caption: Option<&str>) -> Result<()> {
        let file = self.load_upload(path).await?;
        let caption = caption.filter(|caption| !caption.is_empty());

        match kind {
            MediaKind::Photo => {
                let mut request = self.bot.send_photo(ChatId(chat_id), file);
                if let Some(caption) = caption {
                    request = request.caption(caption);
                }
                request.await?;
            }
            MediaKind::Document => {
                let mut request = self.bot.send_document(ChatId(chat_id), file);
                if let Some(caption) = caption {
                    request = request.caption(caption);
                }
                request.await?;
            }
        }

        log_outbound(chat_id, kind.as_str());
        Ok(())
    }

    async fn send_keyboard(&self, chat_id: i64, text: &str, buttons: &[String]) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_markup(reply_keyboard(buttons))
            .await?;
        log_outbound(chat_id, "keyboard");
        Ok(())
    }
}
