//! Greeting conversation
//!
//! `start` -> `greeting` -> `farewell` -> back to `start` on request.

use tracing::debug;
use crate::bot::{BotContext, StateBot};
use crate::state::UserState;
use crate::transport::IncomingMessage;
use crate::utils::errors::Result;

pub const START: &str = crate::state::DEFAULT_STATE;
pub const GREETING: &str = "greeting";
pub const FAREWELL: &str = "farewell";

pub const PROMPT: &str = "Hello! How can I assist you? (type 'greet' or 'bye')";
pub const ACKNOWLEDGEMENT: &str = "Nice to meet you! How are you?";
pub const GOODBYE: &str = "Goodbye! Have a great day!";
pub const HINT: &str = "Please type 'greet' or 'bye'";
pub const FAREWELL_REMINDER: &str = "You have already said goodbye. Type 'start' to begin again.";

/// Register all greeting states on a stateful bot
pub fn register_greeting_flow(bot: &StateBot) -> Result<()> {
    bot.register_state(START, handle_start)?;
    bot.register_state(GREETING, handle_greeting)?;
    bot.register_state(FAREWELL, handle_farewell)?;
    Ok(())
}

/// Any message in `start` prompts the user and moves on to `greeting`
pub async fn handle_start(ctx: BotContext, msg: IncomingMessage, _state: UserState) -> Result<()> {
    ctx.send_text(msg.chat_id, PROMPT).await?;
    ctx.set_state(msg.user_id, GREETING)
}

pub async fn handle_greeting(ctx: BotContext, msg: IncomingMessage, _state: UserState) -> Result<()> {
    match msg.text() {
        "greet" => ctx.send_text(msg.chat_id, ACKNOWLEDGEMENT).await,
        "bye" => {
            ctx.send_text(msg.chat_id, GOODBYE).await?;
            ctx.set_state(msg.user_id, FAREWELL)
        }
        other => {
            debug!(user_id = msg.user_id, text = other, "Unrecognized greeting input");
            ctx.send_text(msg.chat_id, HINT).await
        }
    }
}

/// Reminds the user they left; `start` begins the conversation again
pub async fn handle_farewell(ctx: BotContext, msg: IncomingMessage, _state: UserState) -> Result<()> {
    ctx.send_text(msg.chat_id, FAREWELL_REMINDER).await?;
    if msg.text() == "start" {
        ctx.set_state(msg.user_id, START)?;
    }
    Ok(())
}
