//! State manager
//!
//! Combines the [`StateStore`] and the [`HandlerRegistry`] to route an
//! inbound message to the handler bound to its sender's current state.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use futures::FutureExt;
use tracing::{debug, error};
use crate::bot::BotContext;
use crate::gateway::OutboundGateway;
use crate::handlers::StateHandler;
use crate::transport::IncomingMessage;
use crate::utils::errors::Result;
use crate::utils::logging::log_routing_miss;
use super::registry::HandlerRegistry;
use super::storage::{StateStore, UserState};

/// Result of a single dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler for `state` ran to completion
    Handled { state: String },
    /// No handler is bound to `state`; the message was dropped
    NoHandler { state: String },
    /// The handler for `state` returned an error or panicked
    HandlerFailed { state: String, error: String },
}

impl DispatchOutcome {
    pub fn state(&self) -> &str {
        match self {
            DispatchOutcome::Handled { state }
            | DispatchOutcome::NoHandler { state }
            | DispatchOutcome::HandlerFailed { state, .. } => state,
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled { .. })
    }
}

/// Per-user finite-state dispatcher
#[derive(Debug, Clone, Default)]
pub struct StateManager {
    store: Arc<StateStore>,
    registry: Arc<HandlerRegistry>,
}

impl StateManager {
    /// Create a manager with an empty store and registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager over existing components
    pub fn with_parts(store: Arc<StateStore>, registry: Arc<HandlerRegistry>) -> Self {
        Self { store, registry }
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    /// Bind a handler to a state
    pub fn register_state<H>(&self, state: impl Into<String>, handler: H)
    where
        H: StateHandler + 'static,
    {
        self.registry.register(state, handler);
    }

    /// Current state of a user, created on first sight
    pub fn get_state(&self, user_id: i64) -> UserState {
        self.store.get(user_id)
    }

    /// Move a known user to another state
    pub fn set_state(&self, user_id: i64, state: impl Into<String>) -> Result<()> {
        self.store.set(user_id, state)
    }

    /// Handler bound to a state, if any
    pub fn get_handler(&self, state: &str) -> Option<Arc<dyn StateHandler>> {
        self.registry.lookup(state)
    }

    /// Route one message: look up the sender's state, then run the bound handler.
    ///
    /// Exactly one attempt is made. Handler errors and panics are logged and
    /// reported in the outcome, never propagated.
    pub async fn dispatch(&self, gateway: Arc<dyn OutboundGateway>, message: IncomingMessage) -> DispatchOutcome {
        let record = self.store.get(message.user_id);
        let state = record.state.clone();

        let Some(handler) = self.registry.lookup(&state) else {
            log_routing_miss(message.user_id, &state);
            return DispatchOutcome::NoHandler { state };
        };

        debug!(user_id = message.user_id, state = %state, "Dispatching message");
        let user_id = message.user_id;
        let ctx = BotContext::new(gateway, self.store.clone());
        let run = handler.handle(ctx, message, record);

        match AssertUnwindSafe(run).catch_unwind().await {
            Ok(Ok(())) => DispatchOutcome::Handled { state },
            Ok(Err(e)) => {
                error!(user_id = user_id, state = %state, error = %e, "State handler failed");
                DispatchOutcome::HandlerFailed { state, error: e.to_string() }
            }
            Err(panic) => {
                let error = panic_message(panic.as_ref());
                error!(user_id = user_id, state = %state, error = %error, "State handler panicked");
                DispatchOutcome::HandlerFailed { state, error }
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
