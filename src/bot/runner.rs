//! Update loop
//!
//! Pulls messages from an [`UpdateSource`] and dispatches them one at a time,
//! in arrival order, until the source is exhausted.

use std::sync::Arc;
use tracing::{debug, info, trace};
use crate::gateway::OutboundGateway;
use crate::middleware::OwnerFilter;
use crate::state::{DispatchOutcome, StateManager};
use crate::transport::{IncomingMessage, UpdateSource};

/// Counters collected over one run of the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub received: u64,
    /// Messages without a text payload
    pub skipped_no_text: u64,
    /// Messages dropped by the owner filter
    pub rejected: u64,
    pub handled: u64,
    /// Messages whose sender's state had no handler
    pub unrouted: u64,
    pub failed: u64,
}

/// Sequential consumer driving the [`StateManager`]
pub struct UpdateLoop {
    manager: StateManager,
    gateway: Arc<dyn OutboundGateway>,
    owner_filter: OwnerFilter,
    debug: bool,
}

impl UpdateLoop {
    pub fn new(manager: StateManager, gateway: Arc<dyn OutboundGateway>, owner_filter: OwnerFilter) -> Self {
        Self {
            manager,
            gateway,
            owner_filter,
            debug: false,
        }
    }

    /// Log every inbound message at info level
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Consume the source until it ends.
    ///
    /// Blocks the calling task for as long as the source stays open.
    pub async fn run<S: UpdateSource>(&self, mut source: S) -> LoopStats {
        let mut stats = LoopStats::default();
        info!(owner_only = self.owner_filter.is_active(), "Update loop started");

        while let Some(message) = source.next_message().await {
            stats.received += 1;
            self.process(message, &mut stats).await;
        }

        info!(
            received = stats.received,
            handled = stats.handled,
            unrouted = stats.unrouted,
            failed = stats.failed,
            "Inbound stream closed, update loop finished"
        );
        stats
    }

    /// Filter and dispatch a single message
    pub async fn process(&self, message: IncomingMessage, stats: &mut LoopStats) -> Option<DispatchOutcome> {
        if self.debug {
            info!(message = ?message, "Inbound message");
        } else {
            trace!(user_id = message.user_id, chat_id = message.chat_id, "Inbound message");
        }

        if !message.has_text() {
            debug!(user_id = message.user_id, message_id = message.message_id, "Skipping message without text");
            stats.skipped_no_text += 1;
            return None;
        }

        if !self.owner_filter.allows(&message) {
            stats.rejected += 1;
            return None;
        }

        let outcome = self.manager.dispatch(self.gateway.clone(), message).await;
        match outcome {
            DispatchOutcome::Handled { .. } => stats.handled += 1,
            DispatchOutcome::NoHandler { .. } => stats.unrouted += 1,
            DispatchOutcome::HandlerFailed { .. } => stats.failed += 1,
        }

        Some(outcome)
    }
}
