//! Handler registry
//!
//! Maps state names to the handlers that run while a user is in that state.

use std::sync::Arc;
use dashmap::DashMap;
use tracing::debug;
use crate::handlers::StateHandler;

/// State name to handler mapping. The last registration for a name wins.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: DashMap<String, Arc<dyn StateHandler>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to a state, replacing any previous binding
    pub fn register<H>(&self, state: impl Into<String>, handler: H)
    where
        H: StateHandler + 'static,
    {
        let state = state.into();
        if self.handlers.insert(state.clone(), Arc::new(handler)).is_some() {
            debug!(state = %state, "Replaced state handler");
        } else {
            debug!(state = %state, "Registered state handler");
        }
    }

    /// Look up the handler bound to a state
    pub fn lookup(&self, state: &str) -> Option<Arc<dyn StateHandler>> {
        self.handlers.get(state).map(|entry| entry.value().clone())
    }

    /// Registered state names, sorted
    pub fn states(&self) -> Vec<String> {
        let mut states: Vec<String> = self.handlers.iter().map(|entry| entry.key().clone()).collect();
        states.sort();
        states
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("states", &self.states())
            .finish()
    }
}
