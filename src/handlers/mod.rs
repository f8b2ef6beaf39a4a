//! Bot handlers module
//!
//! This module defines the [`StateHandler`] capability bound to conversation
//! states, and ships the greeting conversation used by the demo binary.

pub mod greeting;

use std::future::Future;
use async_trait::async_trait;
use crate::bot::BotContext;
use crate::state::UserState;
use crate::transport::IncomingMessage;
use crate::utils::errors::Result;

pub use greeting::register_greeting_flow;

/// Logic that runs when a user in a given state sends a message.
///
/// Handlers reply through the context's gateway and move the user to another
/// state with [`BotContext::set_state`]. Any `async fn(BotContext,
/// IncomingMessage, UserState) -> Result<()>` is a handler.
#[async_trait]
pub trait StateHandler: Send + Sync {
    async fn handle(&self, ctx: BotContext, message: IncomingMessage, state: UserState) -> Result<()>;
}

#[async_trait]
impl<F, Fut> StateHandler for F
where
    F: Fn(BotContext, IncomingMessage, UserState) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    async fn handle(&self, ctx: BotContext, message: IncomingMessage, state: UserState) -> Result<()> {
        (self)(ctx, message, state).await
    }
}
