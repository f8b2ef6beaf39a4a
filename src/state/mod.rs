//! State management module
//!
//! This module handles per-user conversation state and state-based routing

pub mod manager;
pub mod registry;
pub mod storage;

// Re-export commonly used state components
pub use manager::{DispatchOutcome, StateManager};
pub use registry::HandlerRegistry;
pub use storage::{StateStore, UserState, DEFAULT_STATE};
