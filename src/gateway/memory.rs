//! In-memory gateway
//!
//! Records every send instead of talking to a chat platform. Useful for
//! dry runs and for asserting on replies in tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::utils::errors::{ChatFlowError, Result};
use super::{FormatMode, MediaKind, OutboundGateway};

/// One recorded send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text { chat_id: i64, text: String },
    RichText { chat_id: i64, text: String, mode: FormatMode },
    Media { chat_id: i64, kind: MediaKind, path: PathBuf, caption: Option<String> },
    Keyboard { chat_id: i64, text: String, buttons: Vec<String> },
}

impl Outbound {
    pub fn chat_id(&self) -> i64 {
        match self {
            Outbound::Text { chat_id, .. }
            | Outbound::RichText { chat_id, .. }
            | Outbound::Media { chat_id, .. }
            | Outbound::Keyboard { chat_id, .. } => *chat_id,
        }
    }

    /// Message text, or the caption for media
    pub fn text(&self) -> Option<&str> {
        match self {
            Outbound::Text { text, .. } | Outbound::RichText { text, .. } | Outbound::Keyboard { text, .. } => {
                Some(text)
            }
            Outbound::Media { caption, .. } => caption.as_deref(),
        }
    }
}

/// Gateway that keeps sends in memory
#[derive(Debug, Default)]
pub struct MemoryGateway {
    sent: Mutex<Vec<Outbound>>,
    failing: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following send fail with a connection error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All recorded sends, oldest first
    pub async fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().await.clone()
    }

    /// Texts of all recorded sends
    pub async fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|outbound| outbound.text().map(str::to_owned))
            .collect()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }

    async fn record(&self, outbound: Outbound) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ChatFlowError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "memory gateway is set to fail",
            )));
        }
        self.sent.lock().await.push(outbound);
        Ok(())
    }
}

#[async_trait]
impl OutboundGateway for MemoryGateway {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.record(Outbound::Text { chat_id, text: text.to_string() }).await
    }

    async fn send_rich_text(&self, chat_id: i64, text: &str, mode: FormatMode) -> Result<()> {
        self.record(Outbound::RichText { chat_id, text: text.to_string(), mode }).await
    }

    async fn send_media(&self, chat_id: i64, kind: MediaKind, path: &Path, caption: Option<&str>) -> Result<()> {
        self.record(Outbound::Media {
            chat_id,
            kind,
            path: path.to_path_buf(),
            caption: caption.map(str::to_owned),
        })
        .await
    }

    async fn send_keyboard(&self, chat_id: i64, text: &str, buttons: &[String]) -> Result<()> {
        self.record(Outbound::Keyboard {
            chat_id,
            text: text.to_string(),
            buttons: buttons.to_vec(),
        })
        .await
    }
}
