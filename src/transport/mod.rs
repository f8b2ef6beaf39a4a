//! Inbound transport module
//!
//! An [`UpdateSource`] yields inbound messages one at a time until the
//! underlying stream closes. Once it returns `None` it is exhausted; a new
//! source has to be built to read again.

pub mod message;
pub mod polling;

use async_trait::async_trait;
use tokio::sync::mpsc;

pub use message::IncomingMessage;
pub use polling::TelegramPolling;

/// A lazy, possibly infinite sequence of inbound messages
#[async_trait]
pub trait UpdateSource: Send {
    /// Next message, or `None` at end of stream
    async fn next_message(&mut self) -> Option<IncomingMessage>;
}

#[async_trait]
impl UpdateSource for mpsc::Receiver<IncomingMessage> {
    async fn next_message(&mut self) -> Option<IncomingMessage> {
        self.recv().await
    }
}
